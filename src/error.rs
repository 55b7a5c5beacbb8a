use crate::models::TagId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Counter source error: {0}")]
    CounterSource(String),

    #[error("Score store error: {0}")]
    ScoreStore(String),

    #[error("Collaborator call timed out after {0}ms")]
    Timeout(u64),

    #[error("Tag not found: {0}")]
    TagNotFound(TagId),

    #[error("Configuration error: {0}")]
    Config(String),
}
