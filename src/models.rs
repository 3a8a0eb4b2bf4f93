use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single generic preference value. Stored as bare JSON: `true`, a string, or
/// whatever else a page script handed over (numbers, objects).
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(untagged)]
pub enum PrefValue {
    Flag(bool),
    Text(String),
    Other(serde_json::Value),
}

impl PrefValue {
    /// Same rules as a JavaScript `if (value)`.
    pub fn is_truthy(&self) -> bool {
        match self {
            PrefValue::Flag(b) => *b,
            PrefValue::Text(s) => !s.is_empty(),
            PrefValue::Other(Value::Null) => false,
            PrefValue::Other(Value::Bool(b)) => *b,
            PrefValue::Other(Value::String(s)) => !s.is_empty(),
            PrefValue::Other(Value::Number(n)) => n.as_f64().map_or(false, |f| f != 0.0),
            PrefValue::Other(_) => true,
        }
    }

    /// Values `set` refuses to store: `false` and `null`.
    pub fn is_removal(&self) -> bool {
        matches!(
            self,
            PrefValue::Flag(false) | PrefValue::Other(Value::Null) | PrefValue::Other(Value::Bool(false))
        )
    }
}

impl From<bool> for PrefValue {
    fn from(b: bool) -> Self {
        PrefValue::Flag(b)
    }
}

impl From<&str> for PrefValue {
    fn from(s: &str) -> Self {
        PrefValue::Text(s.to_string())
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub struct PreferenceSet {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "unique_flights")]
    pub flights: Vec<String>,
    #[serde(default)] // older blobs only carried destination and flights
    pub flags: BTreeMap<String, PrefValue>,
}

impl PreferenceSet {
    pub fn is_empty(&self) -> bool {
        self.destination.is_none() && self.flights.is_empty() && self.flags.is_empty()
    }

    pub fn has_flight(&self, id: &str) -> bool {
        self.flights.iter().any(|f| f == id)
    }

    pub fn flag(&self, key: &str) -> bool {
        self.flags.get(key).map_or(false, PrefValue::is_truthy)
    }

    pub fn is_preferred(&self, binding: &Binding) -> bool {
        match binding {
            Binding::Flag(key) => self.flag(key),
            Binding::Flight(id) => self.has_flight(id),
            Binding::Destination(code) => self.destination.as_deref() == Some(code.as_str()),
        }
    }
}

fn unique_flights<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<String> = Vec::deserialize(deserializer)?;
    let mut flights: Vec<String> = Vec::with_capacity(raw.len());
    for id in raw {
        if !flights.contains(&id) {
            flights.push(id);
        }
    }
    Ok(flights)
}

/// What a preference button (or card) is bound to, read from its data attributes.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Binding {
    Flag(String),
    Flight(String),
    Destination(String),
}

/// `"<traveler>-<airport>-<direction>"`, e.g. `luke-stl-out`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FlightId<'a> {
    pub traveler: &'a str,
    pub airport: &'a str,
    pub direction: &'a str,
}

impl<'a> FlightId<'a> {
    pub const DELIMITER: char = '-';

    pub fn parse(id: &'a str) -> Option<Self> {
        let mut parts = id.split(Self::DELIMITER);
        let traveler = parts.next().filter(|p| !p.is_empty())?;
        let airport = parts.next().filter(|p| !p.is_empty())?;
        let direction = parts.next().filter(|p| !p.is_empty())?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self { traveler, airport, direction })
    }
}
