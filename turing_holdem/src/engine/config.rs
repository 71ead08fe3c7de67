//! Table settings.

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use crate::game::entities::Usd;

/// Most seats that fit on a table with a single 52 card deck.
pub const MAX_PLAYERS: usize = 23;

/// Settings for a single cash-game hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSettings {
    /// Seats dealt into the hand (default: 6)
    pub player_count: usize,

    /// Chips each seat starts the hand with
    pub starting_stack: Usd,

    /// Posted by seat 0
    pub small_blind: Usd,

    /// Posted by seat 1
    pub big_blind: Usd,

    /// Smallest opening bet and smallest raise increment
    pub min_bet: Usd,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            player_count: 6,
            starting_stack: 1000,
            small_blind: 25,
            big_blind: 50,
            min_bet: 50,
        }
    }
}

impl TableSettings {
    /// Settings used for bulk hand-strength sampling: deeper stacks, same
    /// blinds.
    #[must_use]
    pub fn data_generation() -> Self {
        Self {
            starting_stack: 2000,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }

        if self.big_blind < self.small_blind {
            return Err(ConfigError::Invalid(
                "Big blind must be at least the small blind".to_string(),
            ));
        }

        if self.min_bet == 0 {
            return Err(ConfigError::Invalid("Minimum bet must be positive".to_string()));
        }

        if self.starting_stack == 0 {
            return Err(ConfigError::Invalid(
                "Starting stack must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
