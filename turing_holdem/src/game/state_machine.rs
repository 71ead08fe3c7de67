//! Hand phase progression.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entities::Street;

/// Where the orchestrator is within a single hand.
///
/// Phases only move forward, one street at a time, and `Settled` is
/// absorbing.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum HandPhase {
    #[default]
    Preflop,
    Flop,
    Turn,
    River,
    Settled,
}

impl HandPhase {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Preflop => Self::Flop,
            Self::Flop => Self::Turn,
            Self::Turn => Self::River,
            Self::River | Self::Settled => Self::Settled,
        }
    }

    /// The betting street played in this phase.
    #[must_use]
    pub fn street(self) -> Option<Street> {
        match self {
            Self::Preflop => Some(Street::Preflop),
            Self::Flop => Some(Street::Flop),
            Self::Turn => Some(Street::Turn),
            Self::River => Some(Street::River),
            Self::Settled => None,
        }
    }

    #[must_use]
    pub fn is_settled(self) -> bool {
        self == Self::Settled
    }
}

impl From<Street> for HandPhase {
    fn from(street: Street) -> Self {
        match street {
            Street::Preflop => Self::Preflop,
            Street::Flop => Self::Flop,
            Street::Turn => Self::Turn,
            Street::River => Self::River,
        }
    }
}

impl fmt::Display for HandPhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.street() {
            Some(street) => write!(f, "{street}"),
            None => write!(f, "Settled"),
        }
    }
}
