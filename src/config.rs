use serde::Deserialize;

use crate::services::weights::ScoringWeights;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Days until a browsing event or saved configuration stops counting
    #[serde(default = "default_recency_window_days")]
    pub recency_window_days: f64,

    /// Multiplier applied to recency-weighted browsing seconds
    #[serde(default = "default_browsing_duration_weight")]
    pub browsing_duration_weight: f64,

    /// Contribution of a fully recent saved configuration to a car score
    #[serde(default = "default_saved_configuration_weight")]
    pub saved_configuration_weight: f64,

    /// Contribution of each past selection of an option
    #[serde(default = "default_option_selection_weight")]
    pub option_selection_weight: f64,

    /// Bonus granted when an option matches a strong preference
    #[serde(default = "default_option_preference_bonus")]
    pub option_preference_bonus: f64,

    /// Number of cars returned when the caller gives no limit
    #[serde(default = "default_car_limit")]
    pub default_car_limit: usize,

    /// Most recent browsing events kept per shopper
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_recency_window_days() -> f64 {
    ScoringWeights::default().recency_window_days
}

fn default_browsing_duration_weight() -> f64 {
    ScoringWeights::default().browsing_duration_weight
}

fn default_saved_configuration_weight() -> f64 {
    ScoringWeights::default().saved_configuration_weight
}

fn default_option_selection_weight() -> f64 {
    ScoringWeights::default().option_selection_weight
}

fn default_option_preference_bonus() -> f64 {
    ScoringWeights::default().option_preference_bonus
}

fn default_car_limit() -> usize {
    3
}

fn default_history_window() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            recency_window_days: default_recency_window_days(),
            browsing_duration_weight: default_browsing_duration_weight(),
            saved_configuration_weight: default_saved_configuration_weight(),
            option_selection_weight: default_option_selection_weight(),
            option_preference_bonus: default_option_preference_bonus(),
            default_car_limit: default_car_limit(),
            history_window: default_history_window(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from `(NAME, value)` pairs and validate it
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the scorers cannot work with
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.recency_window_days.is_finite() || self.recency_window_days <= 0.0 {
            anyhow::bail!(
                "RECENCY_WINDOW_DAYS must be a positive number, got {}",
                self.recency_window_days
            );
        }

        let weights = [
            ("BROWSING_DURATION_WEIGHT", self.browsing_duration_weight),
            ("SAVED_CONFIGURATION_WEIGHT", self.saved_configuration_weight),
            ("OPTION_SELECTION_WEIGHT", self.option_selection_weight),
            ("OPTION_PREFERENCE_BONUS", self.option_preference_bonus),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("{} must be a non-negative number, got {}", name, value);
            }
        }

        if self.history_window == 0 {
            anyhow::bail!("HISTORY_WINDOW must be at least 1");
        }
        if self.default_car_limit == 0 {
            anyhow::bail!("DEFAULT_CAR_LIMIT must be at least 1");
        }

        Ok(())
    }

    /// Tuning constants handed to the scorers
    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights {
            recency_window_days: self.recency_window_days,
            browsing_duration_weight: self.browsing_duration_weight,
            saved_configuration_weight: self.saved_configuration_weight,
            option_selection_weight: self.option_selection_weight,
            option_preference_bonus: self.option_preference_bonus,
        }
    }
}
