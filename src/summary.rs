use crate::config::Labels;
use crate::models::{FlightId, PreferenceSet};

#[derive(Clone, Debug, PartialEq)]
pub enum SummaryBlock {
    Destination(String),
    Flights { heading: String, lines: Vec<String> },
}

/// Human-readable digest of the current preferences.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub blocks: Vec<SummaryBlock>,
    pub placeholder: String,
}

impl Summary {
    pub fn build(prefs: &PreferenceSet, labels: &Labels) -> Self {
        let mut blocks = Vec::new();
        if let Some(code) = &prefs.destination {
            blocks.push(SummaryBlock::Destination(format!(
                "Destination: {}",
                labels.airport(code)
            )));
        }
        if !prefs.flights.is_empty() {
            blocks.push(SummaryBlock::Flights {
                heading: labels.flights_heading.clone(),
                lines: prefs.flights.iter().map(|id| flight_line(id, labels)).collect(),
            });
        }
        Self {
            blocks,
            placeholder: labels.empty_summary.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Flattened text, one entry per rendered line.
    #[cfg(test)]
    pub fn lines(&self) -> Vec<String> {
        if self.is_empty() {
            return vec![self.placeholder.clone()];
        }
        let mut out = Vec::new();
        for block in &self.blocks {
            match block {
                SummaryBlock::Destination(line) => out.push(line.clone()),
                SummaryBlock::Flights { heading, lines } => {
                    out.push(heading.clone());
                    out.extend(lines.iter().cloned());
                }
            }
        }
        out
    }
}

/// `luke-stl-out` becomes `Luke STL outbound`. Unparsable ids are shown as is.
pub fn flight_line(id: &str, labels: &Labels) -> String {
    match FlightId::parse(id) {
        Some(flight) => format!(
            "{} {} {}",
            labels.traveler(flight.traveler),
            flight.airport.to_uppercase(),
            Labels::direction(flight.direction)
        ),
        None => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::preferences::PreferenceStore;
    use crate::services::storage::MemoryStorage;

    #[test]
    fn flight_preference_shows_in_summary() {
        let store = PreferenceStore::new(MemoryStorage::new(), "ozark-trip-preferences");
        store.toggle_flight("luke-stl-out");
        let prefs = store.get_all();
        assert_eq!(prefs.flights, vec!["luke-stl-out"]);

        let summary = Summary::build(&prefs, &Labels::default());
        assert_eq!(summary.blocks.len(), 1);
        assert!(summary.lines().contains(&"Luke STL outbound".to_string()));
    }

    #[test]
    fn destination_toggle_returns_to_placeholder() {
        let labels = Labels::default();
        let store = PreferenceStore::new(MemoryStorage::new(), "ozark-trip-preferences");

        store.set_destination("stl");
        let summary = Summary::build(&store.get_all(), &labels);
        assert_eq!(summary.lines(), vec!["Destination: St. Louis (STL)"]);

        store.set_destination("stl");
        let summary = Summary::build(&store.get_all(), &labels);
        assert!(summary.is_empty());
        assert_eq!(summary.lines(), vec![labels.empty_summary.clone()]);
    }

    #[test]
    fn both_blocks_in_order() {
        let prefs = PreferenceSet {
            destination: Some("xna".into()),
            flights: vec!["luke-xna-ret".into(), "zed-bkg-out".into(), "oddball".into()],
            ..PreferenceSet::default()
        };
        let summary = Summary::build(&prefs, &Labels::default());
        assert_eq!(
            summary.lines(),
            vec![
                "Destination: Northwest Arkansas (XNA)",
                "Preferred flights",
                "Luke XNA return",
                "Traveler BKG outbound",
                "oddball",
            ]
        );
    }

    #[test]
    fn flags_alone_do_not_produce_blocks() {
        let mut prefs = PreferenceSet::default();
        prefs.flags.insert("hotel".into(), true.into());
        assert!(Summary::build(&prefs, &Labels::default()).is_empty());
    }
}
