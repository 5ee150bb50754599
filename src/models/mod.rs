use serde::Serialize;

mod catalog;
mod signals;

pub use catalog::{
    clamp_feature_score, Car, ConfigCategory, ConfigOption, FeatureScoreMatrix,
    MAX_FEATURE_SCORE, MIN_FEATURE_SCORE,
};
pub use signals::{
    clamp_preference_value, BrowsingEvent, Preference, SavedConfiguration, ShopperSignals,
    MAX_PREFERENCE_VALUE, MIN_PREFERENCE_VALUE,
};

/// A candidate paired with the score it was ranked by
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Ranked<T> {
    #[serde(flatten)]
    pub item: T,
    pub score: f64,
}

/// A car with its match score, highest first in responses
pub type ScoredCar = Ranked<Car>;

/// An option with its match score
pub type ScoredOption = Ranked<ConfigOption>;

/// The ranked options of one configuration category
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedCategory {
    pub category_id: String,
    pub name: String,
    pub options: Vec<ScoredOption>,
}
