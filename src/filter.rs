use crate::models::PreferenceSet;

pub const FILTER_ALL: &str = "all";
pub const FILTER_PREFERRED: &str = "preferred";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AirportFilter {
    All,
    Code(String),
}

impl AirportFilter {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case(FILTER_ALL) || value.is_empty() {
            AirportFilter::All
        } else {
            AirportFilter::Code(value.to_lowercase())
        }
    }

    pub fn matches(&self, airport: Option<&str>) -> bool {
        match self {
            AirportFilter::All => true,
            AirportFilter::Code(code) => airport.map_or(false, |a| a.eq_ignore_ascii_case(code)),
        }
    }
}

/// Current filter selection. Lives only in memory, never in the preference blob.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    pub airport: AirportFilter,
    pub preferred_only: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            airport: AirportFilter::All,
            preferred_only: false,
        }
    }
}

impl FilterState {
    pub fn set_preferred(&mut self, value: &str) {
        self.preferred_only = value.eq_ignore_ascii_case(FILTER_PREFERRED);
    }
}

/// A flight card as read from `data-airport` / `data-flight`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlightCard {
    pub airport: Option<String>,
    pub flight: Option<String>,
}

pub fn is_visible(card: &FlightCard, filter: &FilterState, prefs: &PreferenceSet) -> bool {
    if !filter.airport.matches(card.airport.as_deref()) {
        return false;
    }
    if filter.preferred_only {
        return card.flight.as_deref().map_or(false, |id| prefs.has_flight(id));
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(airport: &str, flight: &str) -> FlightCard {
        FlightCard {
            airport: Some(airport.into()),
            flight: Some(flight.into()),
        }
    }

    #[test]
    fn airport_filter_matches_exactly() {
        let prefs = PreferenceSet::default();
        let mut filter = FilterState::default();
        let stl = card("stl", "luke-stl-out");
        let xna = card("xna", "luke-xna-out");
        assert!(is_visible(&stl, &filter, &prefs));
        assert!(is_visible(&xna, &filter, &prefs));

        filter.airport = AirportFilter::parse("STL");
        assert!(is_visible(&stl, &filter, &prefs));
        assert!(!is_visible(&xna, &filter, &prefs));
        assert!(!is_visible(&FlightCard::default(), &filter, &prefs));

        filter.airport = AirportFilter::parse("all");
        assert!(is_visible(&xna, &filter, &prefs));
    }

    #[test]
    fn preferred_filter_uses_membership() {
        let prefs = PreferenceSet {
            flights: vec!["luke-stl-out".into()],
            ..PreferenceSet::default()
        };
        let mut filter = FilterState::default();
        filter.set_preferred("preferred");
        assert!(is_visible(&card("stl", "luke-stl-out"), &filter, &prefs));
        assert!(!is_visible(&card("stl", "luke-stl-ret"), &filter, &prefs));

        filter.set_preferred("all");
        assert!(is_visible(&card("stl", "luke-stl-ret"), &filter, &prefs));
    }

    #[test]
    fn filters_combine() {
        let prefs = PreferenceSet {
            flights: vec!["luke-stl-out".into(), "luke-xna-out".into()],
            ..PreferenceSet::default()
        };
        let filter = FilterState {
            airport: AirportFilter::parse("xna"),
            preferred_only: true,
        };
        assert!(!is_visible(&card("stl", "luke-stl-out"), &filter, &prefs));
        assert!(is_visible(&card("xna", "luke-xna-out"), &filter, &prefs));
    }
}
