//! Betting engine error types.

use thiserror::Error;

use super::config::MAX_PLAYERS;

/// Table settings errors
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    #[error("Player count {0} outside 2..={MAX_PLAYERS}")]
    PlayerCount(usize),

    #[error("Invalid table settings: {0}")]
    Invalid(String),
}

/// Engine operation errors
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EngineError {
    /// The engine refused an action in the current state
    #[error("Illegal {action}: {reason}")]
    IllegalAction { action: &'static str, reason: String },

    /// The engine is in a state no caller should be able to reach
    #[error("Engine desynchronized: {0}")]
    Desynchronized(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    pub(crate) fn illegal(action: &'static str, reason: impl Into<String>) -> Self {
        Self::IllegalAction {
            action,
            reason: reason.into(),
        }
    }
}

/// Engine result type
pub type EngineResult<T> = Result<T, EngineError>;
