//! Tunable combat rules

use crate::combat::LootThresholds;
use crate::stats::LevelGrowth;
use serde::{Deserialize, Serialize};

/// Rule constants used by the combat service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatRules {
    /// Experience granted per level of the defeated monster
    #[serde(default = "default_experience_per_level")]
    pub experience_per_level: u32,
    #[serde(default)]
    pub loot: LootThresholds,
    #[serde(default)]
    pub flee: FleeRules,
    #[serde(default)]
    pub level_growth: LevelGrowth,
}

impl Default for CombatRules {
    fn default() -> Self {
        CombatRules {
            experience_per_level: default_experience_per_level(),
            loot: LootThresholds::default(),
            flee: FleeRules::default(),
            level_growth: LevelGrowth::default(),
        }
    }
}

fn default_experience_per_level() -> u32 {
    20
}

/// Escape chance: `base + (hero agility - monster agility) * per_agility`,
/// clamped to `min..=max` percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleeRules {
    #[serde(default = "default_base_chance")]
    pub base_chance: i64,
    #[serde(default = "default_per_agility")]
    pub per_agility: i64,
    #[serde(default = "default_min_chance")]
    pub min_chance: i64,
    #[serde(default = "default_max_chance")]
    pub max_chance: i64,
}

impl Default for FleeRules {
    fn default() -> Self {
        FleeRules {
            base_chance: default_base_chance(),
            per_agility: default_per_agility(),
            min_chance: default_min_chance(),
            max_chance: default_max_chance(),
        }
    }
}

fn default_base_chance() -> i64 {
    60
}
fn default_per_agility() -> i64 {
    5
}
fn default_min_chance() -> i64 {
    10
}
fn default_max_chance() -> i64 {
    95
}

impl FleeRules {
    /// Percent chance (1-100 scale) that the hero escapes
    pub fn chance(&self, hero_agility: u32, monster_agility: u32) -> u32 {
        let diff = i64::from(hero_agility) - i64::from(monster_agility);
        let chance = self.base_chance + diff * self.per_agility;
        chance.max(self.min_chance).min(self.max_chance).clamp(0, 100) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = CombatRules::default();
        assert_eq!(rules.experience_per_level, 20);
        assert_eq!(rules.loot.rare, 95);
        assert_eq!(rules.level_growth.max_hp, 10);
    }

    #[test]
    fn test_flee_chance_clamps() {
        let flee = FleeRules::default();
        assert_eq!(flee.chance(5, 5), 60);
        assert_eq!(flee.chance(8, 5), 75);
        assert_eq!(flee.chance(30, 1), 95);
        assert_eq!(flee.chance(1, 30), 10);
    }

    #[test]
    fn test_parse_rules() {
        let toml = r#"
experience_per_level = 25

[loot]
rare = 99

[flee]
base_chance = 50
"#;
        let rules: CombatRules = toml::from_str(toml).unwrap();
        assert_eq!(rules.experience_per_level, 25);
        assert_eq!(rules.loot.rare, 99);
        assert_eq!(rules.loot.mana, 70);
        assert_eq!(rules.flee.base_chance, 50);
        assert_eq!(rules.flee.max_chance, 95);
    }
}
