use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        BrowsingEvent, Car, ConfigCategory, FeatureScoreMatrix, Preference, SavedConfiguration,
        ShopperSignals,
    },
    services::feature_catalog::FeatureCatalog,
};

use super::repository::{CatalogRepository, SignalRecorder, SignalRepository};
use super::seed;

/// Process-local store for shopper signals and the car catalog
pub struct InMemoryStore {
    shoppers: RwLock<HashMap<String, ShopperSignals>>,
    cars: Vec<Car>,
    features: FeatureCatalog,
    categories: HashMap<String, Vec<ConfigCategory>>,
    history_window: usize,
}

impl InMemoryStore {
    /// Creates a store with no cars and no shoppers
    pub fn new(history_window: usize) -> Self {
        Self {
            shoppers: RwLock::new(HashMap::new()),
            cars: Vec::new(),
            features: FeatureCatalog::new(),
            categories: HashMap::new(),
            history_window,
        }
    }

    /// Creates a store preloaded with the demo catalog
    pub fn with_demo_catalog(history_window: usize) -> Self {
        Self::new(history_window).with_catalog(
            seed::demo_cars(),
            seed::demo_feature_catalog(),
            seed::demo_config_categories(),
        )
    }

    /// Replaces the catalog
    pub fn with_catalog(
        mut self,
        cars: Vec<Car>,
        features: FeatureCatalog,
        categories: HashMap<String, Vec<ConfigCategory>>,
    ) -> Self {
        self.cars = cars;
        self.features = features;
        self.categories = categories;
        self
    }

    /// Replaces every signal of a shopper at once
    pub async fn insert_signals(&self, shopper_id: &str, signals: ShopperSignals) {
        let mut shoppers = self.shoppers.write().await;
        shoppers.insert(shopper_id.to_string(), signals);
    }

    fn car_exists(&self, car_id: &str) -> bool {
        self.cars.iter().any(|c| c.id == car_id)
    }

    fn validate_options(&self, car_id: &str, options: &HashMap<String, String>) -> AppResult<()> {
        let categories = self
            .categories
            .get(car_id)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for (category_id, option_id) in options {
            let category = categories
                .iter()
                .find(|c| &c.id == category_id)
                .ok_or_else(|| {
                    AppError::InvalidInput(format!(
                        "Car {} has no category {}",
                        car_id, category_id
                    ))
                })?;

            if !category.has_option(option_id) {
                return Err(AppError::InvalidInput(format!(
                    "Category {} has no option {}",
                    category_id, option_id
                )));
            }
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl SignalRepository for InMemoryStore {
    async fn get_by_shopper_id(&self, shopper_id: &str) -> AppResult<ShopperSignals> {
        let shoppers = self.shoppers.read().await;
        let mut signals = shoppers.get(shopper_id).cloned().unwrap_or_default();

        // Stable sort keeps insertion order for events sharing a timestamp
        signals
            .browsing_history
            .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        signals.browsing_history.truncate(self.history_window);

        tracing::debug!(
            shopper_id = %shopper_id,
            has_signals = !signals.is_empty(),
            preferences = signals.preferences.len(),
            history = signals.browsing_history.len(),
            saved_configurations = signals.saved_configurations.len(),
            "Loaded shopper signals"
        );

        Ok(signals)
    }
}

#[async_trait::async_trait]
impl CatalogRepository for InMemoryStore {
    async fn list_cars(&self) -> AppResult<Vec<Car>> {
        Ok(self.cars.clone())
    }

    async fn feature_matrix(&self) -> AppResult<FeatureScoreMatrix> {
        Ok(self.features.matrix().clone())
    }

    async fn config_categories(&self, car_id: &str) -> AppResult<Vec<ConfigCategory>> {
        if !self.car_exists(car_id) {
            return Err(AppError::NotFound(format!("Car {}", car_id)));
        }
        Ok(self.categories.get(car_id).cloned().unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl SignalRecorder for InMemoryStore {
    async fn set_preference(&self, shopper_id: &str, preference: Preference) -> AppResult<()> {
        if !self.features.has_feature(&preference.id) {
            let known: Vec<&str> = self.features.feature_ids().into_iter().collect();
            return Err(AppError::InvalidInput(format!(
                "Unknown feature {} (expected one of: {})",
                preference.id,
                known.join(", ")
            )));
        }

        let mut shoppers = self.shoppers.write().await;
        shoppers
            .entry(shopper_id.to_string())
            .or_default()
            .set_preference(preference);
        Ok(())
    }

    async fn record_browsing_event(
        &self,
        shopper_id: &str,
        car_id: &str,
        duration_seconds: u32,
        timestamp: i64,
    ) -> AppResult<()> {
        if !self.car_exists(car_id) {
            return Err(AppError::NotFound(format!("Car {}", car_id)));
        }

        let mut shoppers = self.shoppers.write().await;
        let history = &mut shoppers
            .entry(shopper_id.to_string())
            .or_default()
            .browsing_history;

        history.insert(
            0,
            BrowsingEvent {
                car_id: car_id.to_string(),
                timestamp,
                duration_seconds,
            },
        );
        history.truncate(self.history_window);

        Ok(())
    }

    async fn save_configuration(
        &self,
        shopper_id: &str,
        car_id: &str,
        options: HashMap<String, String>,
        timestamp: i64,
    ) -> AppResult<SavedConfiguration> {
        if !self.car_exists(car_id) {
            return Err(AppError::NotFound(format!("Car {}", car_id)));
        }
        self.validate_options(car_id, &options)?;

        let configuration = SavedConfiguration {
            id: Uuid::new_v4().to_string(),
            car_id: car_id.to_string(),
            options,
            timestamp,
        };

        let mut shoppers = self.shoppers.write().await;
        shoppers
            .entry(shopper_id.to_string())
            .or_default()
            .saved_configurations
            .push(configuration.clone());

        tracing::info!(
            shopper_id = %shopper_id,
            car_id = %car_id,
            configuration_id = %configuration.id,
            "Saved configuration"
        );

        Ok(configuration)
    }

    async fn delete_configuration(
        &self,
        shopper_id: &str,
        configuration_id: &str,
    ) -> AppResult<()> {
        let mut shoppers = self.shoppers.write().await;
        let configurations = shoppers
            .get_mut(shopper_id)
            .map(|s| &mut s.saved_configurations)
            .ok_or_else(|| AppError::NotFound(format!("Configuration {}", configuration_id)))?;

        let before = configurations.len();
        configurations.retain(|c| c.id != configuration_id);

        if configurations.len() == before {
            return Err(AppError::NotFound(format!(
                "Configuration {}",
                configuration_id
            )));
        }

        Ok(())
    }
}
