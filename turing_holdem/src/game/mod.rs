//! Cards, players, and the per-hand orchestration loop.
//!
//! This module provides:
//! - Card, hand, street and action entities
//! - The hand phase state machine
//! - Seated players bound to decision policies
//! - The orchestrator that drives a betting engine street by street,
//!   stepping illegal requests down to legal moves

pub mod entities;
pub mod errors;
pub mod fallback;
pub mod models;
pub mod orchestrator;
pub mod state_machine;

pub use errors::{CardError, GameError, GameResult};
pub use fallback::apply_with_fallback;
pub use models::{Applied, HandSummary, Player, Resolution, Turn};
pub use orchestrator::{Orchestrator, winning_seat};
pub use state_machine::HandPhase;
