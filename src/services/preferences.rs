use std::collections::BTreeMap;

use crate::config::CLEAR_CONFIRM_MESSAGE;
use crate::models::{Binding, PrefValue, PreferenceSet};
use crate::services::storage::StorageBackend;

/// Preferences persisted as one JSON blob under one storage key.
///
/// Every operation re-reads the blob, so the store never holds a stale copy.
pub struct PreferenceStore<S> {
    storage: S,
    key: String,
    legacy_key: Option<String>,
}

impl<S: StorageBackend> PreferenceStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            legacy_key: None,
        }
    }

    /// Also read the old flat flag mapping when the current key is empty.
    pub fn with_legacy_key(mut self, key: impl Into<String>) -> Self {
        self.legacy_key = Some(key.into());
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn get_all(&self) -> PreferenceSet {
        match self.storage.read(&self.key) {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::debug!("ignoring malformed preferences under {}: {}", self.key, e);
                PreferenceSet::default()
            }),
            None => self.read_legacy().unwrap_or_default(),
        }
    }

    fn read_legacy(&self) -> Option<PreferenceSet> {
        let key = self.legacy_key.as_deref()?;
        let json = self.storage.read(key)?;
        let mut flags: BTreeMap<String, PrefValue> = serde_json::from_str(&json).ok()?;
        flags.retain(|_, v| !v.is_removal());
        Some(PreferenceSet {
            flags,
            ..PreferenceSet::default()
        })
    }

    /// Best effort: a failed write is logged and the previous blob stays in place.
    pub fn save_all(&self, prefs: &PreferenceSet) {
        let json = match serde_json::to_string(prefs) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize preferences: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.write(&self.key, &json) {
            log::warn!("Could not save preferences: {:#}", e);
        }
    }

    fn update<R>(&self, f: impl FnOnce(&mut PreferenceSet) -> R) -> R {
        let mut prefs = self.get_all();
        let result = f(&mut prefs);
        self.save_all(&prefs);
        result
    }

    pub fn get(&self, key: &str) -> Option<PrefValue> {
        self.get_all().flags.remove(key)
    }

    /// `None`, `false` and `null` delete the key.
    pub fn set(&self, key: &str, value: Option<PrefValue>) {
        self.update(|prefs| match value {
            Some(value) if !value.is_removal() => {
                prefs.flags.insert(key.to_string(), value);
            }
            _ => {
                prefs.flags.remove(key);
            }
        })
    }

    pub fn toggle(&self, key: &str) -> bool {
        self.update(|prefs| {
            if prefs.flag(key) {
                prefs.flags.remove(key);
                false
            } else {
                prefs.flags.insert(key.to_string(), PrefValue::Flag(true));
                true
            }
        })
    }

    /// Adds the flight if absent, removes it if present. Returns the new membership.
    pub fn toggle_flight(&self, id: &str) -> bool {
        self.update(|prefs| {
            if let Some(pos) = prefs.flights.iter().position(|f| f == id) {
                prefs.flights.remove(pos);
                false
            } else {
                prefs.flights.push(id.to_string());
                true
            }
        })
    }

    /// Selecting the current destination again clears it.
    pub fn set_destination(&self, code: &str) -> Option<String> {
        self.update(|prefs| {
            if prefs.destination.as_deref() == Some(code) {
                prefs.destination = None;
            } else {
                prefs.destination = Some(code.to_string());
            }
            prefs.destination.clone()
        })
    }

    /// Flips whatever `binding` points at. Returns whether it is now active.
    pub fn toggle_binding(&self, binding: &Binding) -> bool {
        match binding {
            Binding::Flag(key) => self.toggle(key),
            Binding::Flight(id) => self.toggle_flight(id),
            Binding::Destination(code) => self.set_destination(code).is_some(),
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(&self.key) {
            log::warn!("Could not clear preferences: {:#}", e);
        }
        if let Some(legacy) = &self.legacy_key {
            if let Err(e) = self.storage.remove(legacy) {
                log::warn!("Could not clear legacy preferences: {:#}", e);
            }
        }
    }

    /// Clears only when `confirm` agrees. Returns whether anything was cleared.
    pub fn clear_all(&self, confirm: impl FnOnce(&str) -> bool) -> bool {
        if !confirm(CLEAR_CONFIRM_MESSAGE) {
            return false;
        }
        self.clear();
        true
    }
}
