pub mod config;
pub mod error;
pub mod jobs;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
pub use jobs::{HotnessRecomputeJob, RecomputeScheduler};
pub use services::{CounterSource, HotnessScorer, InMemoryTagStore, ScoreStore};
