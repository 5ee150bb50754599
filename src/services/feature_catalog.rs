use std::collections::BTreeSet;

use crate::models::{clamp_feature_score, FeatureScoreMatrix};

/// Feature ids the storefront knows about, with display names
pub const KNOWN_FEATURES: &[(&str, &str)] = &[
    ("acceleration", "Acceleration"),
    ("handling", "Handling"),
    ("comfort", "Comfort"),
    ("efficiency", "Fuel Efficiency"),
    ("safety", "Safety"),
    ("interior", "Interior Quality"),
    ("exterior", "Exterior Styling"),
    ("infotainment", "Infotainment"),
];

/// Display name for a known feature id
pub fn feature_name(feature_id: &str) -> Option<&'static str> {
    KNOWN_FEATURES
        .iter()
        .find(|(id, _)| *id == feature_id)
        .map(|(_, name)| *name)
}

/// Read-only per-car feature scores that preferences are matched against
///
/// Every score is clamped to 1-5 on the way in, so the scorers can do plain
/// arithmetic on whatever they read back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCatalog {
    matrix: FeatureScoreMatrix,
}

impl FeatureCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the feature scores of one car
    pub fn with_car(mut self, car_id: impl Into<String>, scores: &[(&str, i64)]) -> Self {
        let entry = self.matrix.entry(car_id.into()).or_default();
        for (feature_id, raw) in scores {
            entry.insert((*feature_id).to_string(), clamp_feature_score(*raw));
        }
        self
    }

    /// Whether any car carries a score for the feature
    pub fn has_feature(&self, feature_id: &str) -> bool {
        self.matrix.values().any(|scores| scores.contains_key(feature_id))
    }

    /// Every feature id scored for at least one car, sorted
    pub fn feature_ids(&self) -> BTreeSet<&str> {
        self.matrix
            .values()
            .flat_map(|scores| scores.keys().map(String::as_str))
            .collect()
    }

    pub fn matrix(&self) -> &FeatureScoreMatrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> FeatureScoreMatrix {
        self.matrix
    }
}

impl From<FeatureScoreMatrix> for FeatureCatalog {
    fn from(mut matrix: FeatureScoreMatrix) -> Self {
        for scores in matrix.values_mut() {
            for score in scores.values_mut() {
                *score = clamp_feature_score(*score as i64);
            }
        }
        Self { matrix }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn catalog() -> FeatureCatalog {
        FeatureCatalog::new()
            .with_car("roadster", &[("acceleration", 5), ("comfort", 2)])
            .with_car("tourer", &[("comfort", 5), ("efficiency", 9)])
    }

    fn score(catalog: &FeatureCatalog, car_id: &str, feature_id: &str) -> Option<u8> {
        catalog.matrix().get(car_id)?.get(feature_id).copied()
    }

    #[test]
    fn test_score_lookup() {
        let catalog = catalog();
        assert_eq!(score(&catalog, "roadster", "acceleration"), Some(5));
        assert_eq!(score(&catalog, "roadster", "efficiency"), None);
        assert_eq!(score(&catalog, "hatchback", "comfort"), None);
    }

    #[test]
    fn test_builder_clamps_scores() {
        assert_eq!(score(&catalog(), "tourer", "efficiency"), Some(5));
    }

    #[test]
    fn test_has_feature() {
        let catalog = catalog();
        assert!(catalog.has_feature("efficiency"));
        assert!(!catalog.has_feature("handling"));
    }

    #[test]
    fn test_from_matrix_clamps_zero_scores() {
        let matrix = FeatureScoreMatrix::from([(
            "city".to_string(),
            HashMap::from([("comfort".to_string(), 0u8), ("safety".to_string(), 7u8)]),
        )]);
        let catalog = FeatureCatalog::from(matrix);

        assert_eq!(score(&catalog, "city", "comfort"), Some(1));
        assert_eq!(score(&catalog, "city", "safety"), Some(5));
    }

    #[test]
    fn test_feature_ids_are_deduplicated() {
        let catalog = catalog();
        let ids: Vec<&str> = catalog.feature_ids().into_iter().collect();
        assert_eq!(ids, vec!["acceleration", "comfort", "efficiency"]);
    }

    #[test]
    fn test_known_feature_names() {
        assert_eq!(feature_name("handling"), Some("Handling"));
        assert_eq!(feature_name("warp-drive"), None);
    }
}
