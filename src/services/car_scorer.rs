use crate::models::{BrowsingEvent, FeatureScoreMatrix, Preference, SavedConfiguration};

use super::recency::recency_weight;
use super::weights::ScoringWeights;

/// The three signal contributions that make up a car's match score
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CarScoreBreakdown {
    /// Preference-weighted average of the car's feature scores (0-5)
    pub preference: f64,
    /// Recency-weighted browsing time on this car
    pub browsing: f64,
    /// Recency-weighted saved configurations of this car
    pub saved_configurations: f64,
}

impl CarScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.preference + self.browsing + self.saved_configurations
    }
}

/// Scores cars for one shopper against the feature matrix
pub struct CarScorer<'a> {
    preferences: &'a [Preference],
    history: &'a [BrowsingEvent],
    saved_configurations: &'a [SavedConfiguration],
    matrix: &'a FeatureScoreMatrix,
    weights: ScoringWeights,
    now: i64,
}

impl<'a> CarScorer<'a> {
    /// Creates a scorer over a snapshot of the shopper's signals taken at `now`
    pub fn new(
        preferences: &'a [Preference],
        history: &'a [BrowsingEvent],
        saved_configurations: &'a [SavedConfiguration],
        matrix: &'a FeatureScoreMatrix,
        now: i64,
    ) -> Self {
        Self {
            preferences,
            history,
            saved_configurations,
            matrix,
            weights: ScoringWeights::default(),
            now,
        }
    }

    /// Replaces the default tuning constants
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Match score of one car
    ///
    /// Cars missing from the feature matrix always score zero, whatever the
    /// browsing or saved-configuration signals say.
    pub fn score(&self, car_id: &str) -> f64 {
        self.breakdown(car_id).total()
    }

    /// Per-signal contributions to a car's match score
    pub fn breakdown(&self, car_id: &str) -> CarScoreBreakdown {
        if !self.matrix.contains_key(car_id) {
            return CarScoreBreakdown::default();
        }

        CarScoreBreakdown {
            preference: self.preference_term(car_id),
            browsing: self.browsing_term(car_id),
            saved_configurations: self.saved_configuration_term(car_id),
        }
    }

    /// Weighted average of feature scores, weighted by preference value
    ///
    /// Features the car has no score for are left out of both sums.
    fn preference_term(&self, car_id: &str) -> f64 {
        let Some(features) = self.matrix.get(car_id) else {
            return 0.0;
        };

        let (weighted, total_weight) = self
            .preferences
            .iter()
            .filter_map(|p| {
                features
                    .get(&p.id)
                    .map(|&score| (score as f64, p.value as f64))
            })
            .fold((0.0, 0.0), |(sum, weight), (score, value)| {
                (sum + score * value, weight + value)
            });

        if total_weight > 0.0 {
            weighted / total_weight
        } else {
            0.0
        }
    }

    fn browsing_term(&self, car_id: &str) -> f64 {
        self.history
            .iter()
            .filter(|event| event.car_id == car_id)
            .map(|event| {
                event.duration_seconds as f64
                    * self.recency(event.timestamp)
                    * self.weights.browsing_duration_weight
            })
            .sum()
    }

    fn saved_configuration_term(&self, car_id: &str) -> f64 {
        self.saved_configurations
            .iter()
            .filter(|config| config.car_id == car_id)
            .map(|config| self.recency(config.timestamp) * self.weights.saved_configuration_weight)
            .sum()
    }

    fn recency(&self, timestamp: i64) -> f64 {
        recency_weight(timestamp, self.now, self.weights.recency_window_days)
    }
}

/// Match score of one car for a shopper, using the default weights
pub fn score_car(
    car_id: &str,
    preferences: &[Preference],
    history: &[BrowsingEvent],
    saved_configurations: &[SavedConfiguration],
    matrix: &FeatureScoreMatrix,
    now: i64,
) -> f64 {
    CarScorer::new(preferences, history, saved_configurations, matrix, now).score(car_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::feature_catalog::FeatureCatalog;
    use std::collections::HashMap;

    const NOW: i64 = 1_760_000_000_000;
    const DAY: i64 = 86_400_000;

    fn matrix() -> FeatureScoreMatrix {
        FeatureCatalog::new()
            .with_car("carA", &[("handling", 5)])
            .with_car("carB", &[("handling", 1)])
            .into_matrix()
    }

    fn handling(value: i64) -> Vec<Preference> {
        vec![Preference::new("handling", "Handling", value)]
    }

    fn view(car_id: &str, timestamp: i64, duration_seconds: u32) -> BrowsingEvent {
        BrowsingEvent {
            car_id: car_id.to_string(),
            timestamp,
            duration_seconds,
        }
    }

    fn saved(car_id: &str, timestamp: i64) -> SavedConfiguration {
        SavedConfiguration {
            id: format!("cfg-{}", timestamp),
            car_id: car_id.to_string(),
            options: HashMap::new(),
            timestamp,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_preference_only_scores() {
        let matrix = matrix();
        let prefs = handling(5);

        assert!(approx(score_car("carA", &prefs, &[], &[], &matrix, NOW), 5.0));
        assert!(approx(score_car("carB", &prefs, &[], &[], &matrix, NOW), 1.0));
    }

    #[test]
    fn test_recent_browsing_adds_scaled_duration() {
        let matrix = matrix();
        let prefs = handling(5);
        let history = vec![view("carB", NOW, 500)];

        let score = score_car("carB", &prefs, &history, &[], &matrix, NOW);
        assert!(approx(score, 6.0));
    }

    #[test]
    fn test_zero_signal_floor() {
        let matrix = matrix();
        assert_eq!(score_car("carA", &[], &[], &[], &matrix, NOW), 0.0);
        assert_eq!(score_car("carB", &[], &[], &[], &matrix, NOW), 0.0);
    }

    #[test]
    fn test_unknown_car_scores_zero_despite_signals() {
        let matrix = matrix();
        let prefs = handling(5);
        let history = vec![view("ghost", NOW, 3_000)];
        let configs = vec![saved("ghost", NOW)];

        assert_eq!(
            score_car("ghost", &prefs, &history, &configs, &matrix, NOW),
            0.0
        );
    }

    #[test]
    fn test_weighted_average_not_sum() {
        let matrix = FeatureCatalog::new()
            .with_car("carA", &[("handling", 5), ("comfort", 1)])
            .into_matrix();
        let prefs = vec![
            Preference::new("handling", "Handling", 3),
            Preference::new("comfort", "Comfort", 1),
        ];

        // (5*3 + 1*1) / (3 + 1)
        let score = score_car("carA", &prefs, &[], &[], &matrix, NOW);
        assert!(approx(score, 4.0));
    }

    #[test]
    fn test_unknown_feature_is_skipped() {
        let matrix = matrix();
        let prefs = vec![
            Preference::new("handling", "Handling", 2),
            Preference::new("hover", "Hover Capability", 5),
        ];

        let score = score_car("carA", &prefs, &[], &[], &matrix, NOW);
        assert!(approx(score, 5.0));
    }

    #[test]
    fn test_zero_valued_preferences_do_not_divide_by_zero() {
        let matrix = matrix();
        let prefs = handling(0);

        assert_eq!(score_car("carA", &prefs, &[], &[], &matrix, NOW), 0.0);
    }

    #[test]
    fn test_browsing_for_other_cars_is_ignored() {
        let matrix = matrix();
        let history = vec![view("carB", NOW, 600)];

        assert_eq!(score_car("carA", &[], &history, &[], &matrix, NOW), 0.0);
    }

    #[test]
    fn test_older_view_contributes_no_more_than_newer_view() {
        let matrix = matrix();
        let older = vec![view("carA", NOW - 10 * DAY, 300)];
        let newer = vec![view("carA", NOW - 2 * DAY, 300)];

        let older_score = score_car("carA", &[], &older, &[], &matrix, NOW);
        let newer_score = score_car("carA", &[], &newer, &[], &matrix, NOW);
        assert!(older_score <= newer_score);
        assert!(newer_score > 0.0);
    }

    #[test]
    fn test_expired_signals_contribute_nothing() {
        let matrix = matrix();
        let history = vec![view("carA", NOW - 45 * DAY, 900)];
        let configs = vec![saved("carA", NOW - 31 * DAY)];

        assert_eq!(score_car("carA", &[], &history, &configs, &matrix, NOW), 0.0);
    }

    #[test]
    fn test_saved_configuration_term() {
        let matrix = matrix();
        let configs = vec![saved("carA", NOW), saved("carA", NOW - 15 * DAY)];

        let breakdown = CarScorer::new(&[], &[], &configs, &matrix, NOW).breakdown("carA");
        assert!(approx(breakdown.saved_configurations, 0.5 + 0.25));
        assert_eq!(breakdown.preference, 0.0);
        assert_eq!(breakdown.browsing, 0.0);
    }

    #[test]
    fn test_custom_weights_are_used() {
        let matrix = matrix();
        let history = vec![view("carA", NOW, 100)];
        let weights = ScoringWeights {
            browsing_duration_weight: 0.1,
            ..ScoringWeights::default()
        };

        let score = CarScorer::new(&[], &history, &[], &matrix, NOW)
            .with_weights(weights)
            .score("carA");
        assert!(approx(score, 10.0));
    }

    #[test]
    fn test_deterministic() {
        let matrix = matrix();
        let prefs = handling(4);
        let history = vec![view("carA", NOW - DAY, 240), view("carB", NOW, 60)];
        let configs = vec![saved("carA", NOW - 3 * DAY)];
        let scorer = CarScorer::new(&prefs, &history, &configs, &matrix, NOW);

        let first = scorer.score("carA");
        for _ in 0..10 {
            assert_eq!(scorer.score("carA"), first);
        }
    }
}
