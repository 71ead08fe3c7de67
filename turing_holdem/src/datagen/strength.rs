//! Raw hand-strength estimates.

use crate::game::entities::{Card, Hand, Value};

/// Scores a starting hand on a board, roughly in `[0, 1]`.
pub trait StrengthEstimator: Send + Sync {
    fn estimate(&self, hand: &Hand, board: &[Card]) -> f32;
}

// === Postflop Bonuses ===

/// A hole card pairs the board
const PAIR_BONUS: f32 = 0.15;

/// Extra when that pair is with the highest board card
const TOP_PAIR_BONUS: f32 = 0.10;

/// A pocket pair above every board card
const OVERPAIR_BONUS: f32 = 0.20;

/// A pocket pair that hit the board
const SET_BONUS: f32 = 0.35;

/// Chen-formula preflop score plus simple made-hand bonuses after the flop.
///
/// Cheap and deterministic, meant as a sampling signal rather than an
/// equity calculation.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChenStrength;

impl ChenStrength {
    /// Chen score, from -1 (72o) to 20 (AA).
    #[must_use]
    pub fn score(hand: &Hand) -> i32 {
        let high = hand.high().value();
        let low = hand.low().value();

        let mut score = card_points(high);
        if hand.is_pair() {
            score = (score * 2.0).max(5.0);
        } else {
            if hand.is_suited() {
                score += 2.0;
            }
            let gap = high.rank() - low.rank() - 1;
            score -= match gap {
                0 => 0.0,
                1 => 1.0,
                2 => 2.0,
                3 => 4.0,
                _ => 5.0,
            };
            if gap <= 1 && high < Value::Queen {
                score += 1.0;
            }
        }
        score.ceil() as i32
    }

    #[must_use]
    pub fn preflop(hand: &Hand) -> f32 {
        (Self::score(hand) as f32 / 20.0).clamp(0.0, 1.0)
    }
}

fn card_points(value: Value) -> f32 {
    match value {
        Value::Ace => 10.0,
        Value::King => 8.0,
        Value::Queen => 7.0,
        Value::Jack => 6.0,
        v => f32::from(v.rank()) / 2.0,
    }
}

impl StrengthEstimator for ChenStrength {
    fn estimate(&self, hand: &Hand, board: &[Card]) -> f32 {
        let base = Self::preflop(hand);
        let Some(top) = board.iter().map(|card| card.value()).max() else {
            return base;
        };
        let on_board = |value: Value| board.iter().any(|card| card.value() == value);

        let bonus = if hand.is_pair() {
            let value = hand.high().value();
            if on_board(value) {
                SET_BONUS
            } else if value > top {
                OVERPAIR_BONUS
            } else {
                0.0
            }
        } else {
            hand.cards()
                .iter()
                .map(|card| card.value())
                .filter(|value| on_board(*value))
                .map(|value| {
                    if value == top {
                        PAIR_BONUS + TOP_PAIR_BONUS
                    } else {
                        PAIR_BONUS
                    }
                })
                .sum()
        };
        (base + bonus).min(1.0)
    }
}
