pub mod handlers;
pub mod models;
pub mod ranking;
pub mod scoring;
pub mod service;

mod errors;

pub use errors::BattleError;
pub use models::{MatchResult, PlayerId, ScoredPlayer};
pub use ranking::rank;
pub use scoring::{compute_score, ScoreCalculator, ScoreWeights, Scorer, WeightedCounterCalculator};
pub use service::BattleService;
