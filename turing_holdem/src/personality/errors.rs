//! Personality error types.

use thiserror::Error;

/// Range notation errors
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RangeError {
    /// A term that isn't valid range notation
    #[error("Invalid range term: {0}")]
    InvalidTerm(String),
}
