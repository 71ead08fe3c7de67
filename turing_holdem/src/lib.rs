//! # Turing Hold'em
//!
//! Orchestration for multi-agent no-limit Texas Hold'em cash-game hands.
//!
//! A fixed set of seated players, each bound to a personality and a
//! decision policy, is driven through the four betting streets of a hand.
//! Every decision comes back as a free-text label, is normalized into an
//! [`Action`](game::entities::Action), and is applied to a betting engine,
//! stepping down to a legal move when the engine won't accept it. The
//! winner of each hand is collected into a per-session report.
//!
//! ## Architecture
//!
//! - [`personality`]: range notation, hand bucketing, the six preset
//!   personalities and their strength-to-action thresholds
//! - [`decision`]: the [`DecisionProvider`](decision::DecisionProvider)
//!   boundary and its range, chat model, and scripted implementations
//! - [`engine`]: the [`BettingEngine`](engine::BettingEngine) contract and a
//!   reference [`Table`](engine::Table)
//! - [`game`]: entities, the hand phase machine, and the
//!   [`Orchestrator`](game::Orchestrator)
//! - [`report`]: session winner reports and their aggregation
//! - [`datagen`]: bulk hand-strength sampling per personality
//!
//! ## Example
//!
//! ```
//! use turing_holdem::{game::entities::{Action, Hand}, personality::{Bucket, Personality}};
//!
//! let tight = Personality::preset("nine_percent").unwrap();
//! let hand: Hand = "AsKs".parse().unwrap();
//! assert_eq!(tight.classify(&hand), Bucket::Middle);
//! assert_eq!(tight.act(0.6), Action::Raise);
//! ```

pub mod datagen;
pub mod decision;
pub mod engine;
pub mod game;
pub mod personality;
pub mod report;

pub use decision::{DecisionProvider, DecisionRequest, Policy, decide};
pub use engine::{BettingEngine, Table, TableSettings};
pub use game::{GameError, Orchestrator, Player, entities};
pub use personality::Personality;
pub use report::Reporter;
