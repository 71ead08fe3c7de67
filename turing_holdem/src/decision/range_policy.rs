//! Range-driven decisions for simulation mode.

use std::{fmt, sync::Arc};

use super::{
    DecisionProvider, DecisionRequest,
    errors::{DecisionError, DecisionResult},
};
use crate::{
    datagen::strength::{ChenStrength, StrengthEstimator},
    game::entities::{Action, Card, Hand, Street},
    personality::{Bucket, Personality},
};

/// Plays a personality's ranges without any external model.
///
/// Preflop hands outside the personality's range are folded straight away.
/// Everything else is scored by the estimator, biased by the personality,
/// and mapped through the personality's threshold table.
#[derive(Clone)]
pub struct RangePolicy {
    personality: Arc<Personality>,
    estimator: Arc<dyn StrengthEstimator>,
}

impl RangePolicy {
    pub fn new(personality: Arc<Personality>, estimator: Arc<dyn StrengthEstimator>) -> Self {
        Self {
            personality,
            estimator,
        }
    }

    /// Score hands with [`ChenStrength`].
    pub fn chen(personality: Arc<Personality>) -> Self {
        Self::new(personality, Arc::new(ChenStrength))
    }

    #[must_use]
    pub fn personality(&self) -> &Personality {
        &self.personality
    }

    /// The action this policy takes for `hand` on `board`.
    #[must_use]
    pub fn choose(&self, hand: &Hand, board: &[Card], street: Street) -> Action {
        if street == Street::Preflop && self.personality.classify(hand) == Bucket::None {
            return Action::Fold;
        }
        let strength = self.personality.adjust(self.estimator.estimate(hand, board));
        self.personality.act(strength)
    }
}

impl DecisionProvider for RangePolicy {
    fn decide(&mut self, request: &DecisionRequest<'_>) -> DecisionResult<String> {
        let hand = Hand::try_from(request.hole_cards)
            .map_err(|err| DecisionError::InvalidRequest(err.to_string()))?;
        let action = self.choose(&hand, request.board, request.street);
        Ok(action.label().to_string())
    }
}

impl fmt::Debug for RangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RangePolicy")
            .field("personality", &self.personality.name)
            .finish_non_exhaustive()
    }
}
