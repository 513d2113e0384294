//! Experience curve and per-level growth

use serde::{Deserialize, Serialize};

/// Experience required per level (`level * EXPERIENCE_PER_LEVEL` to advance)
pub const EXPERIENCE_PER_LEVEL: u32 = 100;

/// Experience needed to advance from `level` to the next one
pub fn experience_to_next_level(level: u32) -> u32 {
    level.saturating_mul(EXPERIENCE_PER_LEVEL)
}

/// Stat gains applied on each level-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelGrowth {
    #[serde(default = "default_pool_growth")]
    pub max_hp: u32,
    #[serde(default = "default_pool_growth")]
    pub max_mp: u32,
    #[serde(default = "default_attribute_growth")]
    pub strength: u32,
    #[serde(default = "default_attribute_growth")]
    pub intelligence: u32,
    #[serde(default = "default_attribute_growth")]
    pub agility: u32,
    #[serde(default = "default_defense_growth")]
    pub defense: u32,
    #[serde(default = "default_defense_growth")]
    pub magic_resistance: u32,
}

impl Default for LevelGrowth {
    fn default() -> Self {
        LevelGrowth {
            max_hp: default_pool_growth(),
            max_mp: default_pool_growth(),
            strength: default_attribute_growth(),
            intelligence: default_attribute_growth(),
            agility: default_attribute_growth(),
            defense: default_defense_growth(),
            magic_resistance: default_defense_growth(),
        }
    }
}

fn default_pool_growth() -> u32 {
    10
}
fn default_attribute_growth() -> u32 {
    2
}
fn default_defense_growth() -> u32 {
    1
}
