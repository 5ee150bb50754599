use std::collections::HashMap;

use crate::models::{Preference, SavedConfiguration};

use super::weights::ScoringWeights;

/// How a bonus rule recognizes the option it rewards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMatch {
    /// Option id equals the pattern
    Exact(&'static str),
    /// Option id contains the pattern
    Contains(&'static str),
}

impl OptionMatch {
    pub fn matches(&self, option_id: &str) -> bool {
        match self {
            OptionMatch::Exact(pattern) => option_id == *pattern,
            OptionMatch::Contains(pattern) => option_id.contains(pattern),
        }
    }
}

/// Rewards one kind of option when the shopper strongly cares about a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusRule {
    pub category_id: &'static str,
    pub option: OptionMatch,
    pub preference_id: &'static str,
    /// Preference value must be strictly greater than this
    pub threshold: u8,
}

/// Bonus rules shipped with the storefront, at most one per category
pub const DEFAULT_BONUS_RULES: &[BonusRule] = &[
    BonusRule {
        category_id: "exterior-color",
        option: OptionMatch::Exact("red"),
        preference_id: "exterior",
        threshold: 3,
    },
    BonusRule {
        category_id: "wheels",
        option: OptionMatch::Exact("sport"),
        preference_id: "handling",
        threshold: 3,
    },
    BonusRule {
        category_id: "interior",
        option: OptionMatch::Contains("leather"),
        preference_id: "interior",
        threshold: 3,
    },
    BonusRule {
        category_id: "tech-package",
        option: OptionMatch::Contains("advanced"),
        preference_id: "infotainment",
        threshold: 3,
    },
    BonusRule {
        category_id: "performance",
        option: OptionMatch::Contains("sport"),
        preference_id: "acceleration",
        threshold: 3,
    },
];

impl BonusRule {
    /// Whether this rule fires for an option given the shopper's preferences
    pub fn applies(&self, option_id: &str, preferences: &[Preference]) -> bool {
        self.option.matches(option_id)
            && preferences
                .iter()
                .find(|p| p.id == self.preference_id)
                .is_some_and(|p| p.value > self.threshold)
    }
}

/// Category id -> bonus rule lookup table
#[derive(Debug, Clone, PartialEq)]
pub struct BonusRules {
    rules: HashMap<&'static str, BonusRule>,
}

impl Default for BonusRules {
    fn default() -> Self {
        Self::from_rules(DEFAULT_BONUS_RULES)
    }
}

impl BonusRules {
    /// Builds a table; a later rule for the same category replaces an earlier one
    pub fn from_rules(rules: &[BonusRule]) -> Self {
        Self {
            rules: rules.iter().map(|rule| (rule.category_id, *rule)).collect(),
        }
    }

    pub fn rule(&self, category_id: &str) -> Option<&BonusRule> {
        self.rules.get(category_id)
    }

    /// Bonus for an option; categories without a rule earn nothing
    pub fn bonus(
        &self,
        category_id: &str,
        option_id: &str,
        preferences: &[Preference],
        amount: f64,
    ) -> f64 {
        match self.rule(category_id) {
            Some(rule) if rule.applies(option_id, preferences) => amount,
            _ => 0.0,
        }
    }
}

/// Scores configuration options for one shopper
pub struct OptionScorer<'a> {
    saved_configurations: &'a [SavedConfiguration],
    preferences: &'a [Preference],
    rules: &'a BonusRules,
    weights: ScoringWeights,
}

impl<'a> OptionScorer<'a> {
    pub fn new(
        saved_configurations: &'a [SavedConfiguration],
        preferences: &'a [Preference],
        rules: &'a BonusRules,
    ) -> Self {
        Self {
            saved_configurations,
            preferences,
            rules,
            weights: ScoringWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Past selections of the option plus any matching preference bonus
    pub fn score(&self, category_id: &str, option_id: &str) -> f64 {
        self.selection_term(category_id, option_id)
            + self.rules.bonus(
                category_id,
                option_id,
                self.preferences,
                self.weights.option_preference_bonus,
            )
    }

    fn selection_term(&self, category_id: &str, option_id: &str) -> f64 {
        let selections = self
            .saved_configurations
            .iter()
            .filter(|config| config.selection(category_id) == Some(option_id))
            .count();

        selections as f64 * self.weights.option_selection_weight
    }
}

/// Match score of one option, using the default rules and weights
pub fn score_option(
    category_id: &str,
    option_id: &str,
    saved_configurations: &[SavedConfiguration],
    preferences: &[Preference],
) -> f64 {
    let rules = BonusRules::default();
    OptionScorer::new(saved_configurations, preferences, &rules).score(category_id, option_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pref(id: &str, value: i64) -> Vec<Preference> {
        vec![Preference::new(id, id, value)]
    }

    fn saved_with(category_id: &str, option_id: &str) -> SavedConfiguration {
        SavedConfiguration {
            id: format!("cfg-{}", option_id),
            car_id: "roadster".to_string(),
            options: HashMap::from([(category_id.to_string(), option_id.to_string())]),
            timestamp: 0,
        }
    }

    #[test]
    fn test_sport_wheels_bonus_for_handling() {
        let prefs = pref("handling", 4);
        assert_eq!(score_option("wheels", "sport", &[], &prefs), 0.5);
        assert_eq!(score_option("wheels", "standard", &[], &prefs), 0.0);
    }

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(score_option("wheels", "sport", &[], &pref("handling", 3)), 0.0);
    }

    #[test]
    fn test_each_default_rule() {
        let cases = [
            ("exterior-color", "red", "exterior"),
            ("interior", "black-leather", "interior"),
            ("tech-package", "advanced-nav", "infotainment"),
            ("performance", "sport-tune", "acceleration"),
        ];

        for (category_id, option_id, preference_id) in cases {
            let prefs = pref(preference_id, 5);
            assert_eq!(
                score_option(category_id, option_id, &[], &prefs),
                0.5,
                "expected bonus for {}/{}",
                category_id,
                option_id
            );
        }
    }

    #[test]
    fn test_exact_match_does_not_accept_substrings() {
        let prefs = pref("exterior", 5);
        assert_eq!(score_option("exterior-color", "dark-red", &[], &prefs), 0.0);
    }

    #[test]
    fn test_preference_for_other_category_gives_no_bonus() {
        let prefs = pref("acceleration", 5);
        assert_eq!(score_option("wheels", "sport", &[], &prefs), 0.0);
    }

    #[test]
    fn test_category_without_rule_gives_no_bonus() {
        let prefs = pref("handling", 5);
        assert_eq!(score_option("roof", "sport", &[], &prefs), 0.0);
    }

    #[test]
    fn test_past_selections_are_counted() {
        let configs = vec![
            saved_with("wheels", "standard"),
            saved_with("wheels", "standard"),
            saved_with("wheels", "sport"),
            saved_with("interior", "standard"),
        ];

        assert_eq!(score_option("wheels", "standard", &configs, &[]), 1.0);
        assert_eq!(score_option("wheels", "sport", &configs, &[]), 0.5);
    }

    #[test]
    fn test_selection_and_bonus_add_up() {
        let configs = vec![saved_with("wheels", "sport")];
        let prefs = pref("handling", 5);

        assert_eq!(score_option("wheels", "sport", &configs, &prefs), 1.0);
    }

    #[test]
    fn test_deterministic() {
        let configs = vec![
            saved_with("wheels", "sport"),
            saved_with("interior", "black-leather"),
            saved_with("wheels", "sport"),
        ];
        let mut prefs = pref("handling", 5);
        prefs.extend(pref("interior", 4));
        let rules = BonusRules::default();
        let scorer = OptionScorer::new(&configs, &prefs, &rules);

        let first = score_option("wheels", "sport", &configs, &prefs);
        assert_eq!(first, 1.5);
        for _ in 0..10 {
            assert_eq!(score_option("wheels", "sport", &configs, &prefs), first);
            assert_eq!(scorer.score("wheels", "sport"), first);
            assert_eq!(scorer.score("interior", "black-leather"), 1.0);
        }
    }

    #[test]
    fn test_custom_rule_table() {
        let rules = BonusRules::from_rules(&[BonusRule {
            category_id: "roof",
            option: OptionMatch::Contains("glass"),
            preference_id: "comfort",
            threshold: 2,
        }]);
        let prefs = pref("comfort", 3);
        let scorer = OptionScorer::new(&[], &prefs, &rules);

        assert_eq!(scorer.score("roof", "panoramic-glass"), 0.5);
        assert_eq!(scorer.score("wheels", "sport"), 0.0);
    }

    #[test]
    fn test_later_rule_replaces_earlier_for_same_category() {
        let rules = BonusRules::from_rules(&[
            BonusRule {
                category_id: "wheels",
                option: OptionMatch::Exact("sport"),
                preference_id: "handling",
                threshold: 3,
            },
            BonusRule {
                category_id: "wheels",
                option: OptionMatch::Exact("aero"),
                preference_id: "efficiency",
                threshold: 3,
            },
        ]);

        assert_eq!(
            rules.rule("wheels").map(|r| r.option),
            Some(OptionMatch::Exact("aero"))
        );
    }

    #[test]
    fn test_custom_weights() {
        let rules = BonusRules::default();
        let configs = vec![saved_with("wheels", "sport")];
        let prefs = pref("handling", 5);
        let weights = ScoringWeights {
            option_selection_weight: 2.0,
            option_preference_bonus: 1.0,
            ..ScoringWeights::default()
        };

        let scorer = OptionScorer::new(&configs, &prefs, &rules).with_weights(weights);
        assert_eq!(scorer.score("wheels", "sport"), 3.0);
    }
}
