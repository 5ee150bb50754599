/// Milliseconds in one day
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Days after which a browsing event or saved configuration no longer counts
pub const RECENCY_WINDOW_DAYS: f64 = 30.0;

/// Scales browsing seconds so a 300s fresh view is worth about one preference point
pub const BROWSING_DURATION_WEIGHT: f64 = 0.01;

/// Car-score contribution of a saved configuration made just now
pub const SAVED_CONFIGURATION_WEIGHT: f64 = 0.5;

/// Option-score contribution of each past selection of that option
pub const OPTION_SELECTION_WEIGHT: f64 = 0.5;

/// Option-score bonus when a category rule matches a strong preference
pub const OPTION_PREFERENCE_BONUS: f64 = 0.5;

/// Empirical tuning constants used by the scorers
///
/// The defaults are the values the storefront has always shipped with. They are
/// not derived from anything and can be overridden through [`crate::config::Config`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub recency_window_days: f64,
    pub browsing_duration_weight: f64,
    pub saved_configuration_weight: f64,
    pub option_selection_weight: f64,
    pub option_preference_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            recency_window_days: RECENCY_WINDOW_DAYS,
            browsing_duration_weight: BROWSING_DURATION_WEIGHT,
            saved_configuration_weight: SAVED_CONFIGURATION_WEIGHT,
            option_selection_weight: OPTION_SELECTION_WEIGHT,
            option_preference_bonus: OPTION_PREFERENCE_BONUS,
        }
    }
}
