//! Error handling for the talent matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{kind} with id {id} not found")]
    NotFound { kind: &'static str, id: u32 },

    #[error("cannot fit vector space: corpus is empty or has no vocabulary after stop-word removal")]
    EmptyCorpus,

    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    #[error("vector space generation {pinned} is stale (current is {current})")]
    StaleVectorSpace { pinned: u64, current: u64 },

    #[error("engine has not been built yet")]
    EngineUnbuilt,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MatcherError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for MatcherError {
    fn from(err: anyhow::Error) -> Self {
        MatcherError::Configuration(err.to_string())
    }
}
