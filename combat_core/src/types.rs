//! Core types shared across the engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Difficulty tier chosen for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Percent multipliers a difficulty applies to generated monsters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyMultipliers {
    /// Max hp multiplier (100 = unchanged)
    pub hp_percent: u32,
    /// Strength multiplier (100 = unchanged)
    pub strength_percent: u32,
    /// Experience multiplier (100 = unchanged)
    pub xp_percent: u32,
}

impl Difficulty {
    /// Get all difficulty tiers
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Normal, Difficulty::Hard]
    }

    /// Multipliers for this tier, expressed in percent so scaling stays in integers
    pub fn multipliers(self) -> DifficultyMultipliers {
        match self {
            Difficulty::Easy => DifficultyMultipliers {
                hp_percent: 80,
                strength_percent: 80,
                xp_percent: 80,
            },
            Difficulty::Normal => DifficultyMultipliers {
                hp_percent: 100,
                strength_percent: 100,
                xp_percent: 100,
            },
            Difficulty::Hard => DifficultyMultipliers {
                hp_percent: 150,
                strength_percent: 130,
                xp_percent: 150,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        };
        f.write_str(label)
    }
}

/// Error returned when a difficulty name is not recognised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown difficulty '{0}' (expected easy, normal or hard)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}
