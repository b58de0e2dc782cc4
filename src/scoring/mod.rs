//! Priority scoring: rating tables, weights, threshold ladder, and the scorer.

mod engine;
mod ladder;
mod profile;
mod rating;
mod weights;

pub use engine::{score, FactorScore, PriorityRequest, PriorityScorer, ScoreBreakdown};
pub use ladder::{LadderStep, PriorityLadder};
pub use profile::ScoringProfile;
pub use rating::RatingScale;
pub use weights::{normalize, ScoringWeights, WorkloadConfig, BUSINESS_WEIGHTS, STANDARD_WEIGHTS};
