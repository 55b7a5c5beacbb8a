pub mod activity;
pub mod scorer;
pub mod social;
pub mod time_decay;

pub use activity::ActivityBonus;
pub use scorer::{HotnessScorer, ScoreWeights};
pub use social::SocialEffect;
pub use time_decay::{tag_age_days, TimeDecayCurve};
