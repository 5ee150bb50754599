use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lowest score a car can have for a feature
pub const MIN_FEATURE_SCORE: u8 = 1;
/// Highest score a car can have for a feature
pub const MAX_FEATURE_SCORE: u8 = 5;

/// Car id -> feature id -> how well the car embodies the feature (1-5)
pub type FeatureScoreMatrix = HashMap<String, HashMap<String, u8>>;

/// Clamps a raw feature score into the 1-5 range
pub fn clamp_feature_score(raw: i64) -> u8 {
    raw.clamp(MIN_FEATURE_SCORE as i64, MAX_FEATURE_SCORE as i64) as u8
}

/// A car model offered in the storefront
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Car {
    pub id: String,
    pub name: String,
    /// Base price in cents (e.g., 4_299_000 = $42,990.00)
    pub base_price_cents: u32,
}

impl Car {
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_price_cents: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_price_cents,
        }
    }
}

/// A selectable option within a configuration category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigOption {
    pub id: String,
    pub category_id: String,
    pub name: String,
    /// Price on top of the base price, in cents
    pub price_cents: u32,
}

/// A group of mutually exclusive options (e.g., wheels, interior)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigCategory {
    pub id: String,
    pub name: String,
    pub options: Vec<ConfigOption>,
}

impl ConfigCategory {
    /// Creates an empty category
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            options: Vec::new(),
        }
    }

    /// Adds an option to the category, ignoring duplicate ids
    pub fn add_option(&mut self, id: impl Into<String>, name: impl Into<String>, price_cents: u32) {
        let id = id.into();
        if self.has_option(&id) {
            return;
        }
        self.options.push(ConfigOption {
            id,
            category_id: self.id.clone(),
            name: name.into(),
            price_cents,
        });
    }

    /// Checks if the category offers an option
    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|o| o.id == option_id)
    }
}
