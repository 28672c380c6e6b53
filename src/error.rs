// Error types for the spark application.
// Covers Hacker News API failures, cache store failures, and exhausted
// fallback when no story data is available at all.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SparkError {
    #[error("Hacker News API error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("cache store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache store JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no stories available: {0}")]
    Unavailable(String),

    #[error("background feed service is gone")]
    Disconnected,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SparkError>;
