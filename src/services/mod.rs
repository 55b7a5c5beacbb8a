pub mod scoring;
pub mod store;

pub use scoring::{ActivityBonus, HotnessScorer, ScoreWeights, SocialEffect, TimeDecayCurve};
pub use store::{CounterSource, InMemoryTagStore, ScoreStore};
