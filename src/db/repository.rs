use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::{Car, ConfigCategory, FeatureScoreMatrix, Preference, SavedConfiguration, ShopperSignals},
};

/// Read access to shopper signals
///
/// Implementations hand back a complete snapshot so scoring never has to go
/// back to the store mid-request.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SignalRepository: Send + Sync {
    /// Signals of one shopper; unknown shoppers get an empty bundle
    ///
    /// Browsing history is newest first and capped to the store's window.
    async fn get_by_shopper_id(&self, shopper_id: &str) -> AppResult<ShopperSignals>;
}

/// Read access to the car catalog and its reference data
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Candidate cars in display order
    async fn list_cars(&self) -> AppResult<Vec<Car>>;

    /// Feature scores of every car
    async fn feature_matrix(&self) -> AppResult<FeatureScoreMatrix>;

    /// Configuration categories of one car, `NotFound` for unknown cars
    async fn config_categories(&self, car_id: &str) -> AppResult<Vec<ConfigCategory>>;
}

/// Write access used by the storefront when a shopper acts
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SignalRecorder: Send + Sync {
    /// Creates or replaces a preference by feature id
    async fn set_preference(&self, shopper_id: &str, preference: Preference) -> AppResult<()>;

    /// Appends a browsing event stamped with `timestamp`
    async fn record_browsing_event(
        &self,
        shopper_id: &str,
        car_id: &str,
        duration_seconds: u32,
        timestamp: i64,
    ) -> AppResult<()>;

    /// Stores a new configuration and returns it with its assigned id
    async fn save_configuration(
        &self,
        shopper_id: &str,
        car_id: &str,
        options: HashMap<String, String>,
        timestamp: i64,
    ) -> AppResult<SavedConfiguration>;

    /// Removes a saved configuration, `NotFound` if the shopper has none with that id
    async fn delete_configuration(&self, shopper_id: &str, configuration_id: &str)
        -> AppResult<()>;
}
