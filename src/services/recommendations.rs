use std::sync::Arc;
use std::time::Instant;

use crate::{
    db::{CatalogRepository, SignalRepository},
    error::{AppError, AppResult},
    models::{RankedCategory, ScoredCar},
};

use super::car_scorer::CarScorer;
use super::feature_catalog::FeatureCatalog;
use super::option_scorer::{BonusRules, OptionScorer};
use super::ranker::rank;
use super::weights::ScoringWeights;

/// Generates personalized car and option recommendations
///
/// Loads one snapshot of the shopper's signals and the catalog per call, then
/// hands it to the pure scorers. Nothing is cached between calls.
#[derive(Clone)]
pub struct RecommendationService {
    signals: Arc<dyn SignalRepository>,
    catalog: Arc<dyn CatalogRepository>,
    weights: ScoringWeights,
    bonus_rules: Arc<BonusRules>,
}

impl RecommendationService {
    pub fn new(signals: Arc<dyn SignalRepository>, catalog: Arc<dyn CatalogRepository>) -> Self {
        Self {
            signals,
            catalog,
            weights: ScoringWeights::default(),
            bonus_rules: Arc::new(BonusRules::default()),
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Top `limit` cars for a shopper as of `now` (epoch milliseconds)
    pub async fn recommend_cars(
        &self,
        shopper_id: &str,
        limit: usize,
        now: i64,
    ) -> AppResult<Vec<ScoredCar>> {
        let start = Instant::now();

        let (signals, cars, matrix) = tokio::try_join!(
            self.signals.get_by_shopper_id(shopper_id),
            self.catalog.list_cars(),
            self.catalog.feature_matrix(),
        )?;
        // Repository scores are not trusted to be in range
        let matrix = FeatureCatalog::from(matrix).into_matrix();

        let scorer = CarScorer::new(
            &signals.preferences,
            &signals.browsing_history,
            &signals.saved_configurations,
            &matrix,
            now,
        )
        .with_weights(self.weights);

        let candidate_count = cars.len();
        let ranked = rank(cars, |car| scorer.score(&car.id), limit);

        tracing::info!(
            shopper_id = %shopper_id,
            candidates = candidate_count,
            returned = ranked.len(),
            top_score = ranked.first().map(|r| r.score),
            processing_time_us = start.elapsed().as_micros() as u64,
            "Ranked cars"
        );

        Ok(ranked)
    }

    /// Ranked options of one car, per category
    ///
    /// With `category_id` set only that category is returned. `limit = None`
    /// keeps every option of each category.
    pub async fn recommend_options(
        &self,
        shopper_id: &str,
        car_id: &str,
        category_id: Option<&str>,
        limit: Option<usize>,
    ) -> AppResult<Vec<RankedCategory>> {
        let (signals, categories) = tokio::try_join!(
            self.signals.get_by_shopper_id(shopper_id),
            self.catalog.config_categories(car_id),
        )?;

        let categories = match category_id {
            Some(wanted) => {
                let category = categories
                    .into_iter()
                    .find(|c| c.id == wanted)
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Category {} for car {}", wanted, car_id))
                    })?;
                vec![category]
            }
            None => categories,
        };

        let scorer = OptionScorer::new(
            &signals.saved_configurations,
            &signals.preferences,
            &self.bonus_rules,
        )
        .with_weights(self.weights);

        let ranked: Vec<RankedCategory> = categories
            .into_iter()
            .map(|category| {
                let limit = limit.unwrap_or(category.options.len());
                let options = rank(
                    category.options,
                    |option| scorer.score(&option.category_id, &option.id),
                    limit,
                );
                RankedCategory {
                    category_id: category.id,
                    name: category.name,
                    options,
                }
            })
            .collect();

        tracing::info!(
            shopper_id = %shopper_id,
            car_id = %car_id,
            categories = ranked.len(),
            "Ranked configuration options"
        );

        Ok(ranked)
    }
}
