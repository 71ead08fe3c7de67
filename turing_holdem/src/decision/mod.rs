//! Turning a seat's situation into an action.
//!
//! Providers answer with a free-text label. [`decide`] is the only place a
//! label becomes an [`Action`]: an exact, case-insensitive match of `fold`,
//! `check`, `call`, `raise` or `all_in`, with anything else read as a fold.

pub mod chat;
pub mod errors;
pub mod range_policy;
pub mod scripted;

use enum_dispatch::enum_dispatch;
use std::fmt;

pub use chat::{ChatPolicy, LmConfig, PolicyProgram, StreetProgram};
pub use errors::{DecisionError, DecisionResult};
pub use range_policy::RangePolicy;
pub use scripted::ScriptedPolicy;

use crate::game::entities::{Action, Card, Street, format_cards};

/// Everything a provider gets to see when a seat is on act.
#[derive(Clone, Copy, Debug)]
pub struct DecisionRequest<'a> {
    /// Personality name, e.g. `nine_percent`
    pub personality: &'a str,
    pub hole_cards: &'a [Card],
    pub board: &'a [Card],
    pub street: Street,
}

impl fmt::Display for DecisionRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "personality: {}\nhole_cards: {}\nstreet: {}\nboard: {}",
            self.personality,
            format_cards(self.hole_cards),
            self.street,
            format_cards(self.board)
        )
    }
}

/// Something that picks an action label for a seat.
///
/// Calls block until a label is available. Errors mean no label could be
/// produced; an unusable label is not an error.
#[enum_dispatch]
pub trait DecisionProvider {
    fn decide(&mut self, request: &DecisionRequest<'_>) -> DecisionResult<String>;
}

/// The provider bound to a seat.
#[enum_dispatch(DecisionProvider)]
#[derive(Debug)]
pub enum Policy {
    RangePolicy,
    ChatPolicy,
    ScriptedPolicy,
}

/// Ask `provider` for a label and normalize it into an action.
pub fn decide<P: DecisionProvider + ?Sized>(
    provider: &mut P,
    request: &DecisionRequest<'_>,
) -> DecisionResult<Action> {
    let label = provider.decide(request)?;
    Ok(Action::from_label(&label))
}
