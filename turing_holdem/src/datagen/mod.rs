//! Bulk hand-strength sampling per personality.

pub mod generator;
pub mod models;
pub mod strength;

pub use generator::Generator;
pub use models::{PersonalityData, Simulation, StreetRecord, Summary};
pub use strength::{ChenStrength, StrengthEstimator};
