//! Seated players and per-hand records.

use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

use super::entities::{Action, SeatIndex, Street, Usd};
use crate::{decision::Policy, personality::Personality};

/// A seat bound to a personality and the policy that plays it
#[derive(Debug)]
pub struct Player {
    /// Display name, only used in logs
    pub name: String,

    pub personality: Arc<Personality>,

    pub seat: SeatIndex,

    pub policy: Policy,
}

impl Player {
    pub fn new(
        name: impl Into<String>,
        personality: Arc<Personality>,
        seat: SeatIndex,
        policy: impl Into<Policy>,
    ) -> Self {
        Self {
            name: name.into(),
            personality,
            seat,
            policy: policy.into(),
        }
    }
}

/// What the engine was actually asked to do for a seat.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Applied {
    Fold,
    /// Chips put in, zero for a check
    CheckOrCall(Usd),
    RaiseTo(Usd),
}

impl fmt::Display for Applied {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Fold => write!(f, "folds"),
            Self::CheckOrCall(0) => write!(f, "checks"),
            Self::CheckOrCall(amount) => write!(f, "calls {amount}"),
            Self::RaiseTo(amount) => write!(f, "raises to {amount}"),
        }
    }
}

/// A requested action and how it was carried out
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Resolution {
    pub requested: Action,
    pub applied: Applied,
}

impl Resolution {
    /// Whether the engine got something other than what was asked for.
    #[must_use]
    pub fn downgraded(&self) -> bool {
        !matches!(
            (self.requested, self.applied),
            (Action::Fold, Applied::Fold)
                | (Action::Check | Action::Call, Applied::CheckOrCall(_))
                | (Action::Raise | Action::AllIn, Applied::RaiseTo(_))
        )
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.downgraded() {
            write!(f, "{} (wanted to {})", self.applied, self.requested.label())
        } else {
            write!(f, "{}", self.applied)
        }
    }
}

/// One decision taken during a hand
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Turn {
    pub street: Street,
    pub seat: SeatIndex,
    pub resolution: Resolution,
}

/// The outcome of a completed hand
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HandSummary {
    /// Hand number within the run, counting from 1
    pub hand: usize,
    pub winner: SeatIndex,
    pub winner_name: String,
    pub stacks: Vec<Usd>,
    pub turns: Vec<Turn>,
}
