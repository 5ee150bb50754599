pub mod car_scorer;
pub mod feature_catalog;
pub mod option_scorer;
pub mod ranker;
pub mod recency;
pub mod recommendations;
pub mod weights;

pub use car_scorer::{score_car, CarScorer};
pub use option_scorer::{score_option, BonusRules, OptionScorer};
pub use ranker::rank;
pub use recency::recency_weight;
pub use recommendations::RecommendationService;
