use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lowest importance a shopper can give a feature
pub const MIN_PREFERENCE_VALUE: u8 = 0;
/// Highest importance a shopper can give a feature
pub const MAX_PREFERENCE_VALUE: u8 = 5;

/// Clamps a raw preference rating into the 0-5 range
pub fn clamp_preference_value(raw: i64) -> u8 {
    raw.clamp(MIN_PREFERENCE_VALUE as i64, MAX_PREFERENCE_VALUE as i64) as u8
}

/// An explicit rating of how much a shopper cares about one feature
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preference {
    /// Feature identifier (e.g., "handling", "comfort")
    pub id: String,
    /// Display name of the feature
    pub name: String,
    /// Importance from 0 (don't care) to 5 (essential)
    pub value: u8,
}

impl Preference {
    /// Creates a preference, clamping the value into range
    pub fn new(id: impl Into<String>, name: impl Into<String>, value: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value: clamp_preference_value(value),
        }
    }
}

/// One visit to a car's detail page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowsingEvent {
    pub car_id: String,
    /// Epoch milliseconds
    pub timestamp: i64,
    pub duration_seconds: u32,
}

/// A configuration the shopper saved for later
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedConfiguration {
    pub id: String,
    pub car_id: String,
    /// Category id -> selected option id
    pub options: HashMap<String, String>,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl SavedConfiguration {
    /// Returns the option chosen for a category, if any
    pub fn selection(&self, category_id: &str) -> Option<&str> {
        self.options.get(category_id).map(String::as_str)
    }
}

/// Everything the engine knows about one shopper's behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShopperSignals {
    pub preferences: Vec<Preference>,
    /// Newest first
    pub browsing_history: Vec<BrowsingEvent>,
    pub saved_configurations: Vec<SavedConfiguration>,
}

impl ShopperSignals {
    /// Creates an empty signal bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a preference, replacing any existing one with the same id
    pub fn set_preference(&mut self, preference: Preference) {
        if let Some(existing) = self.preferences.iter_mut().find(|p| p.id == preference.id) {
            *existing = preference;
        } else {
            self.preferences.push(preference);
        }
    }

    /// True when no signal of any kind is present
    pub fn is_empty(&self) -> bool {
        self.preferences.is_empty()
            && self.browsing_history.is_empty()
            && self.saved_configurations.is_empty()
    }
}
