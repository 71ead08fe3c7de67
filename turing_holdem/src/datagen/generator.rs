use log::info;
use rayon::prelude::*;

use super::{
    models::{PersonalityData, Simulation, StreetRecord},
    strength::StrengthEstimator,
};
use crate::{
    engine::{BettingEngine, EngineError, EngineResult, Table, TableSettings},
    game::entities::{Hand, Street, format_cards},
    personality::Personality,
};

/// Bulk hand-strength sampler.
///
/// Every simulation deals its own table from `seed + index`, so a run is
/// reproducible no matter how rayon schedules it.
#[derive(Debug, Clone)]
pub struct Generator {
    pub settings: TableSettings,
    pub simulations: usize,
    pub seed: u64,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            settings: TableSettings::data_generation(),
            simulations: 1024,
            seed: 0,
        }
    }
}

impl Generator {
    pub fn run<S>(&self, personality: &Personality, estimator: &S) -> EngineResult<PersonalityData>
    where
        S: StrengthEstimator + ?Sized,
    {
        info!(
            "Generating {} simulations for {}",
            self.simulations, personality.name
        );
        let simulations = (0..self.simulations)
            .into_par_iter()
            .map(|idx| self.simulate(idx, personality, estimator))
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(PersonalityData {
            name: personality.name.clone(),
            simulations,
        })
    }

    fn simulate<S>(&self, idx: usize, personality: &Personality, estimator: &S) -> EngineResult<Simulation>
    where
        S: StrengthEstimator + ?Sized,
    {
        let mut table = Table::seeded(&self.settings, self.seed.wrapping_add(idx as u64))?;
        let hole = Hand::try_from(table.hole_cards(0).as_slice())
            .map_err(|err| EngineError::Desynchronized(err.to_string()))?;

        let mut record = |street: Street| -> EngineResult<StreetRecord> {
            let board = table.board();
            let strength = personality.adjust(estimator.estimate(&hole, &board));
            for _ in 0..table.player_count() {
                if table.street_index() != Some(street.index()) || table.actor_index().is_none() {
                    break;
                }
                table.check_or_call()?;
            }
            Ok(StreetRecord {
                street,
                board: format_cards(&board),
                hand_strength: (strength * 100.0).round() / 100.0,
                action: personality.act(strength),
            })
        };

        Ok(Simulation {
            hole_cards: format_cards(&hole.cards()),
            preflop: record(Street::Preflop)?,
            flop: record(Street::Flop)?,
            turn: record(Street::Turn)?,
            river: record(Street::River)?,
        })
    }
}
