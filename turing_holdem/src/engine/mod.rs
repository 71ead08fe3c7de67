//! The betting engine contract and a reference table implementing it.
//!
//! The orchestrator never touches chips or cards directly. It reads whose
//! turn it is, what street the hand is on, and what the seat can legally
//! do, then asks the engine to apply one of three primitive moves: fold,
//! check/call, or raise to an amount.

pub mod config;
pub mod errors;
pub mod table;

pub use config::{MAX_PLAYERS, TableSettings};
pub use errors::{ConfigError, EngineError, EngineResult};
pub use table::Table;

use crate::game::entities::{Card, SeatIndex, Usd};

/// A no-limit hold'em rules engine for a single hand.
///
/// Street indices count from 0 (preflop) to 3 (river). Once the hand is
/// settled there is no actor and [`street_index`](Self::street_index)
/// returns `None`.
pub trait BettingEngine {
    /// Seats dealt into the hand.
    fn player_count(&self) -> usize;

    /// The seat that must act next, if any.
    fn actor_index(&self) -> Option<SeatIndex>;

    fn street_index(&self) -> Option<usize>;

    /// Community cards dealt so far.
    fn board(&self) -> Vec<Card>;

    fn hole_cards(&self, seat: SeatIndex) -> Vec<Card>;

    fn can_check_or_call(&self) -> bool;

    /// Smallest legal raise-to for the actor, `None` when the actor can't
    /// raise at all.
    fn min_raise_to(&self) -> Option<Usd>;

    fn can_raise_to(&self, amount: Usd) -> bool;

    /// Chips behind plus chips already committed this street.
    fn effective_stack(&self, seat: SeatIndex) -> Usd;

    fn fold(&mut self) -> EngineResult<()>;

    /// Returns the chips the actor put in; zero for a check.
    fn check_or_call(&mut self) -> EngineResult<Usd>;

    fn raise_to(&mut self, amount: Usd) -> EngineResult<()>;

    /// Chips behind for every seat, in seat order.
    fn stacks(&self) -> Vec<Usd>;
}
