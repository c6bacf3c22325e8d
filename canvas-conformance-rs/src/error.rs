use thiserror::Error;

pub type ConformanceResult<T> = Result<T, ConformanceError>;

/// Errors raised by the harness itself, outside of any single case.
#[derive(Debug, Error)]
pub enum ConformanceError {
    #[error("Test case {0:?} is already registered")]
    DuplicateCase(String),

    #[error("Invalid case filter: {0}")]
    InvalidFilter(#[from] regex::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
