//! Decision provider error types.

use thiserror::Error;

/// Decision provider errors
#[derive(Debug, Error)]
pub enum DecisionError {
    /// The provider couldn't produce a label at all (transport failure,
    /// malformed response)
    #[error("Decision provider unavailable: {0}")]
    Unavailable(String),

    /// A policy artifact couldn't be loaded
    #[error("Invalid policy artifact: {0}")]
    Artifact(String),

    /// The request itself can't be answered, e.g. not exactly two hole cards
    #[error("Invalid decision request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for DecisionError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// Decision result type
pub type DecisionResult<T> = Result<T, DecisionError>;
