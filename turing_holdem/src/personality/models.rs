//! Personality models, the preset table, and display names.

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use super::{errors::RangeError, range::Range};
use crate::game::entities::{Action, Hand};

// === Strength Thresholds ===

/// Strength above which a player shoves.
pub const ALL_IN_THRESHOLD: f32 = 0.7;

/// Strength above which a player raises.
pub const RAISE_THRESHOLD: f32 = 0.5;

/// Strength above which a player calls.
pub const CALL_THRESHOLD: f32 = 0.3;

/// Strength above which a player checks rather than folds.
pub const CHECK_THRESHOLD: f32 = 0.2;

/// Which of a personality's ranges a starting hand falls into.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Bucket {
    Strong,
    Middle,
    Speculative,
    None,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Strong => "strong",
            Self::Middle => "middle",
            Self::Speculative => "speculative",
            Self::None => "none",
        };
        write!(f, "{repr}")
    }
}

/// A named playing style: three starting-hand ranges plus a strength bias.
#[derive(Clone, Debug)]
pub struct Personality {
    /// Preset name, also the name recorded as a hand winner
    pub name: String,

    /// Added to every raw strength estimate
    pub bias: f32,

    pub strong: Range,
    pub middle: Range,
    pub speculative: Range,
}

impl Personality {
    pub fn new(
        name: impl Into<String>,
        bias: f32,
        strong: &str,
        middle: &str,
        speculative: &str,
    ) -> Result<Self, RangeError> {
        Ok(Self {
            name: name.into(),
            bias,
            strong: Range::parse(strong)?,
            middle: Range::parse(middle)?,
            speculative: Range::parse(speculative)?,
        })
    }

    /// Bucket a starting hand, checking strong, then middle, then
    /// speculative.
    #[must_use]
    pub fn classify(&self, hand: &Hand) -> Bucket {
        if self.strong.contains(hand) {
            Bucket::Strong
        } else if self.middle.contains(hand) {
            Bucket::Middle
        } else if self.speculative.contains(hand) {
            Bucket::Speculative
        } else {
            Bucket::None
        }
    }

    /// Every hand this personality is willing to play.
    #[must_use]
    pub fn range(&self) -> Range {
        self.strong.union(&self.middle).union(&self.speculative)
    }

    /// Apply the personality bias to a raw strength estimate.
    #[must_use]
    pub fn adjust(&self, raw: f32) -> f32 {
        clamp_strength(raw + self.bias)
    }

    /// Map a strength onto an action. Thresholds are exclusive on the low
    /// side, so exactly 0.7 is a raise and exactly 0.2 is a fold.
    #[must_use]
    pub fn act(&self, strength: f32) -> Action {
        let strength = clamp_strength(strength);
        if strength > ALL_IN_THRESHOLD {
            Action::AllIn
        } else if strength > RAISE_THRESHOLD {
            Action::Raise
        } else if strength > CALL_THRESHOLD {
            Action::Call
        } else if strength > CHECK_THRESHOLD {
            Action::Check
        } else {
            Action::Fold
        }
    }

    /// The six built-in personalities, tightest first.
    pub fn presets() -> &'static [Arc<Personality>] {
        static PRESETS: OnceLock<Vec<Arc<Personality>>> = OnceLock::new();
        PRESETS.get_or_init(|| {
            PRESET_TABLE
                .iter()
                .map(|(name, bias, strong, middle, speculative)| {
                    let personality = Personality::new(*name, *bias, strong, middle, speculative)
                        .expect("preset range notation is valid");
                    Arc::new(personality)
                })
                .collect()
        })
    }

    #[must_use]
    pub fn preset(name: &str) -> Option<Arc<Personality>> {
        Self::presets()
            .iter()
            .find(|personality| personality.name == name)
            .cloned()
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn clamp_strength(strength: f32) -> f32 {
    if strength.is_nan() { 0.0 } else { strength.max(0.0) }
}

type PresetRow = (&'static str, f32, &'static str, &'static str, &'static str);

const PRESET_TABLE: [PresetRow; 6] = [
    ("nine_percent", 0.0, "66+", "AJs+;KQs", "AJo+;KQo"),
    (
        "fifteen_percent",
        0.05,
        "22+",
        "ATs+;KJs+;QJs;JTs;T9s;98s;87s;76s;65s",
        "AJo+;KJo+;QJo",
    ),
    (
        "twenty_percent",
        0.10,
        "22+",
        "ATs+;KTs+;QTs+;J9s+;T8s+;98s;87s;76s;65s;54s",
        "ATo+;KTo+;QTo+;JTo",
    ),
    (
        "twenty_five_percent",
        0.15,
        "22+",
        "A7s+;K9s+;Q9s+;J9s+;T8s+;97s+;86s+;75s+;64s+;54s",
        "A9o+;KTo+;QTo+;JTo;T9o",
    ),
    (
        "thirty_five_percent",
        0.20,
        "22+",
        "A2s+;K8s+;Q8s+;J8s+;T7s+;97s+;86s+;75s+;64s+;54s;43s",
        "A8o+;A2o;A3o;A4o;A5o;K9o+;Q9o+;J9o+;T9o",
    ),
    (
        "fifty_percent",
        0.30,
        "22+",
        "A2s+;K2s+;Q7s+;J7s+;T7s+;96s+;86s+;75s+;64s+;53s+;43s",
        "A2o+;K5o+;Q8o+;J8o+;T8o+;98o;87o;76o;65o",
    ),
];

const FIRST_NAMES: [&str; 10] = [
    "Liam", "Olivia", "Noah", "Emma", "Oliver", "Ava", "Elijah", "Sophia", "James", "Isabella",
];

const LAST_NAMES: [&str; 10] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Miller", "Davis", "Garcia", "Rodriguez",
    "Wilson",
];

/// Pick a display name for a seated player.
pub fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Player");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("One");
    format!("{first} {last}")
}
