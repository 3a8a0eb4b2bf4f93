use std::collections::BTreeMap;

pub const KEY_PREFERENCES: &str = "ozark-trip-preferences";
/// Flat flag mapping written by the first version of the page script.
pub const KEY_LEGACY_PREFS: &str = "ozarkPrefs";

pub const CLEAR_CONFIRM_MESSAGE: &str = "Clear all your preferences and selections?";

/// Page markup contract plus display labels.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub storage_key: String,
    pub legacy_key: Option<String>,
    pub button_selector: String,
    pub card_selector: String,
    pub flight_card_selector: String,
    pub airport_filter_selector: String,
    pub preferred_filter_selector: String,
    pub clear_selector: String,
    pub summary_id: String,
    pub active_class: String,
    pub selected_class: String,
    pub hidden_class: String,
    pub labels: Labels,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: KEY_PREFERENCES.to_string(),
            legacy_key: Some(KEY_LEGACY_PREFS.to_string()),
            button_selector: ".pref-btn".to_string(),
            card_selector: ".destination-card, .flight-card".to_string(),
            flight_card_selector: ".flight-card".to_string(),
            airport_filter_selector: ".airport-filter[data-airport]".to_string(),
            preferred_filter_selector: ".preferred-filter[data-preferred]".to_string(),
            clear_selector: "[data-clear-prefs]".to_string(),
            summary_id: "prefs-summary".to_string(),
            active_class: "active".to_string(),
            selected_class: "selected".to_string(),
            hidden_class: "hidden".to_string(),
            labels: Labels::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Labels {
    pub travelers: BTreeMap<String, String>,
    pub airports: BTreeMap<String, String>,
    pub fallback_traveler: String,
    pub empty_summary: String,
    pub flights_heading: String,
}

impl Labels {
    pub fn traveler(&self, code: &str) -> &str {
        self.travelers
            .get(&code.to_lowercase())
            .map(String::as_str)
            .unwrap_or(self.fallback_traveler.as_str())
    }

    /// `St. Louis (STL)` for known codes, the upper-cased code otherwise.
    pub fn airport(&self, code: &str) -> String {
        let upper = code.to_uppercase();
        match self.airports.get(&code.to_lowercase()) {
            Some(name) => format!("{} ({})", name, upper),
            None => upper,
        }
    }

    pub fn direction(code: &str) -> &str {
        match code {
            "out" | "outbound" => "outbound",
            "ret" | "return" | "back" => "return",
            other => other,
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        let travelers = [("luke", "Luke")];
        let airports = [
            ("stl", "St. Louis"),
            ("xna", "Northwest Arkansas"),
            ("sgf", "Springfield"),
            ("bkg", "Branson"),
            ("mci", "Kansas City"),
        ];
        Self {
            travelers: travelers.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            airports: airports.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            fallback_traveler: "Traveler".to_string(),
            empty_summary: "No preferences selected yet.".to_string(),
            flights_heading: "Preferred flights".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn airport_labels() {
        let labels = Labels::default();
        assert_eq!(labels.airport("stl"), "St. Louis (STL)");
        assert_eq!(labels.airport("STL"), "St. Louis (STL)");
        assert_eq!(labels.airport("ord"), "ORD");
    }

    #[test]
    fn unknown_traveler_falls_back() {
        let labels = Labels::default();
        assert_eq!(labels.traveler("luke"), "Luke");
        assert_eq!(labels.traveler("zed"), "Traveler");
    }
}
