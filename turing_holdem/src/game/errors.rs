//! Game error types.

use thiserror::Error;

use super::entities::{Card, SeatIndex};
use crate::{decision::DecisionError, engine::EngineError, report::ReportError};

/// Card and hand parsing errors
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CardError {
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),

    #[error("Duplicate card: {0}")]
    DuplicateCard(Card),

    #[error("Expected two hole cards, got {0}")]
    WrongCount(usize),
}

/// Errors that stop a run. Every variant raised while playing names the
/// hand (counting from 1) and, where known, the seat.
#[derive(Debug, Error)]
pub enum GameError {
    /// The engine reported a state the orchestrator can't reconcile
    #[error("Hand {hand}{}: engine desynchronized: {reason}", seat_suffix(*seat))]
    Desynchronized {
        hand: usize,
        seat: Option<SeatIndex>,
        reason: String,
    },

    #[error("Hand {hand}, seat {seat}: {source}")]
    ProviderUnavailable {
        hand: usize,
        seat: SeatIndex,
        #[source]
        source: DecisionError,
    },

    #[error("Hand {hand}{}: {source}", seat_suffix(*seat))]
    Engine {
        hand: usize,
        seat: Option<SeatIndex>,
        #[source]
        source: EngineError,
    },

    #[error("Invalid seating: {0}")]
    Seating(String),

    #[error(transparent)]
    Report(#[from] ReportError),
}

impl GameError {
    pub(crate) fn desync(hand: usize, seat: Option<SeatIndex>, reason: impl Into<String>) -> Self {
        Self::Desynchronized {
            hand,
            seat,
            reason: reason.into(),
        }
    }

    /// Wrap an engine error, keeping engine desyncs distinguishable.
    pub(crate) fn engine(hand: usize, seat: Option<SeatIndex>, source: EngineError) -> Self {
        match source {
            EngineError::Desynchronized(reason) => Self::desync(hand, seat, reason),
            source => Self::Engine { hand, seat, source },
        }
    }

    /// The hand the error happened in, if it happened while playing.
    #[must_use]
    pub fn hand(&self) -> Option<usize> {
        match self {
            Self::Desynchronized { hand, .. }
            | Self::ProviderUnavailable { hand, .. }
            | Self::Engine { hand, .. } => Some(*hand),
            Self::Seating(_) | Self::Report(_) => None,
        }
    }

    #[must_use]
    pub fn seat(&self) -> Option<SeatIndex> {
        match self {
            Self::Desynchronized { seat, .. } | Self::Engine { seat, .. } => *seat,
            Self::ProviderUnavailable { seat, .. } => Some(*seat),
            Self::Seating(_) | Self::Report(_) => None,
        }
    }
}

fn seat_suffix(seat: Option<SeatIndex>) -> String {
    seat.map(|seat| format!(", seat {seat}")).unwrap_or_default()
}

/// Game result type
pub type GameResult<T> = Result<T, GameError>;
