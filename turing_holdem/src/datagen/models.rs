//! Generated hand-strength records.

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    game::entities::{Action, Street},
    report::{ReportError, ReportResult},
};

/// Seat 0's view of one street
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetRecord {
    pub street: Street,

    /// Board cards visible on this street
    pub board: String,

    /// Bias-adjusted strength, rounded to two decimals
    pub hand_strength: f32,

    pub action: Action,
}

/// One simulated hand, checked down to the river
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub hole_cards: String,
    pub preflop: StreetRecord,
    pub flop: StreetRecord,
    pub turn: StreetRecord,
    pub river: StreetRecord,
}

impl Simulation {
    #[must_use]
    pub fn street(&self, street: Street) -> &StreetRecord {
        match street {
            Street::Preflop => &self.preflop,
            Street::Flop => &self.flop,
            Street::Turn => &self.turn,
            Street::River => &self.river,
        }
    }
}

/// Every simulation generated for one personality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityData {
    pub name: String,
    pub simulations: Vec<Simulation>,
}

impl PersonalityData {
    /// Write `<name>.json` and `<name>_summary.json` into `dir`.
    pub fn write(&self, dir: &Path) -> ReportResult<(PathBuf, PathBuf)> {
        fs::create_dir_all(dir).map_err(ReportError::io(dir))?;

        let data_path = dir.join(format!("{}.json", self.name));
        write_json(&data_path, self)?;

        let summary_path = dir.join(format!("{}_summary.json", self.name));
        write_json(&summary_path, &Summary::from(self))?;

        Ok((data_path, summary_path))
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> ReportResult<()> {
    let file = fs::File::create(path).map_err(ReportError::io(path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(ReportError::json(path))?;
    writer.flush().map_err(ReportError::io(path))
}

/// Mean strength per street
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,

    /// Keyed `preflop_avg`, `flop_avg`, `turn_avg`, `river_avg`
    pub averages: BTreeMap<String, f32>,
}

impl Summary {
    #[must_use]
    pub fn average(&self, street: Street) -> Option<f32> {
        self.averages.get(&average_key(street)).copied()
    }
}

fn average_key(street: Street) -> String {
    format!("{}_avg", street.to_string().to_lowercase())
}

impl From<&PersonalityData> for Summary {
    fn from(data: &PersonalityData) -> Self {
        let count = data.simulations.len();
        let averages = Street::ALL
            .into_iter()
            .map(|street| {
                let total: f32 = data
                    .simulations
                    .iter()
                    .map(|simulation| simulation.street(street).hand_strength)
                    .sum();
                let mean = if count == 0 { 0.0 } else { total / count as f32 };
                (average_key(street), mean)
            })
            .collect();
        Self { count, averages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(street: Street, hand_strength: f32) -> StreetRecord {
        StreetRecord {
            street,
            board: String::new(),
            hand_strength,
            action: Action::Check,
        }
    }

    fn simulation(strengths: [f32; 4]) -> Simulation {
        Simulation {
            hole_cards: "As Kd".to_string(),
            preflop: record(Street::Preflop, strengths[0]),
            flop: record(Street::Flop, strengths[1]),
            turn: record(Street::Turn, strengths[2]),
            river: record(Street::River, strengths[3]),
        }
    }

    #[test]
    fn test_summary_averages() {
        let data = PersonalityData {
            name: "nine_percent".to_string(),
            simulations: vec![
                simulation([0.5, 0.25, 0.0, 1.0]),
                simulation([0.25, 0.75, 0.5, 1.0]),
            ],
        };
        let summary = Summary::from(&data);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.averages.len(), 4);
        assert_eq!(summary.average(Street::Preflop), Some(0.375));
        assert_eq!(summary.average(Street::Flop), Some(0.5));
        assert_eq!(summary.average(Street::Turn), Some(0.25));
        assert_eq!(summary.average(Street::River), Some(1.0));
        assert!(summary.averages.contains_key("preflop_avg"));
    }

    #[test]
    fn test_empty_summary() {
        let data = PersonalityData {
            name: "empty".to_string(),
            simulations: Vec::new(),
        };
        let summary = Summary::from(&data);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average(Street::River), Some(0.0));
    }
}
