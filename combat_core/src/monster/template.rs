//! MonsterTemplate - Base stat profile scaled by floor and difficulty

use crate::stats::{Stats, StatsError};
use crate::types::Difficulty;
use serde::{Deserialize, Serialize};

/// Mana pool every generated monster carries
pub const MONSTER_MAX_MP: u32 = 10;

/// A named monster profile loaded from the template table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub name: String,
    /// Share of the 1-100 selection roll
    pub weight: u32,
    pub base_hp: u32,
    pub base_strength: u32,
    #[serde(default)]
    pub base_defense: u32,
    #[serde(default)]
    pub base_agility: u32,
}

impl MonsterTemplate {
    pub fn new(
        name: impl Into<String>,
        weight: u32,
        base_hp: u32,
        base_strength: u32,
        base_defense: u32,
        base_agility: u32,
    ) -> Self {
        MonsterTemplate {
            name: name.into(),
            weight,
            base_hp,
            base_strength,
            base_defense,
            base_agility,
        }
    }

    /// Stats for this template on `floor`
    ///
    /// Hp and strength take the difficulty multiplier (rounded down).
    /// Defense and agility only grow with depth.
    pub fn scaled(&self, floor: u32, difficulty: Difficulty) -> Result<Stats, StatsError> {
        let mult = difficulty.multipliers();
        let max_hp = scale(
            self.base_hp.saturating_add(floor.saturating_mul(10)),
            mult.hp_percent,
        );
        let strength = scale(self.base_strength.saturating_add(floor), mult.strength_percent);

        Stats::builder(format!("{} Lvl {}", self.name, floor))
            .level(floor)
            .max_hp(max_hp)
            .max_mp(MONSTER_MAX_MP)
            .mp(0)
            .strength(strength)
            .defense(self.base_defense.saturating_add(floor / 2))
            .agility(self.base_agility.saturating_add(floor / 3))
            .build()
    }
}

fn scale(value: u32, percent: u32) -> u32 {
    (u64::from(value) * u64::from(percent) / 100).min(u64::from(u32::MAX)) as u32
}

/// Pick the template whose cumulative weight range contains `roll`
///
/// Rolls past the total weight land on the last template.
pub fn select_template(templates: &[MonsterTemplate], roll: u32) -> Option<&MonsterTemplate> {
    let mut cumulative = 0u32;
    for template in templates {
        cumulative = cumulative.saturating_add(template.weight);
        if roll <= cumulative {
            return Some(template);
        }
    }
    templates.last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_monster_templates;

    #[test]
    fn test_orc_on_hard_floor_five() {
        let orc = MonsterTemplate::new("Orc", 10, 80, 16, 4, 1);
        let stats = orc.scaled(5, Difficulty::Hard).unwrap();

        assert_eq!(stats.name(), "Orc Lvl 5");
        assert_eq!(stats.level(), 5);
        assert_eq!(stats.max_hp(), 195);
        assert_eq!(stats.hp(), 195);
        assert_eq!(stats.strength(), 27);
        assert_eq!(stats.defense(), 6);
        assert_eq!(stats.agility(), 2);
        assert_eq!(stats.mp(), 0);
        assert_eq!(stats.max_mp(), 10);
    }

    #[test]
    fn test_easy_rounds_down() {
        let slime = MonsterTemplate::new("Slime", 40, 30, 10, 0, 2);
        let stats = slime.scaled(1, Difficulty::Easy).unwrap();

        assert_eq!(stats.max_hp(), 32);
        assert_eq!(stats.strength(), 8);
        assert_eq!(stats.defense(), 0);
        assert_eq!(stats.agility(), 2);
    }

    #[test]
    fn test_selection_boundaries() {
        let table = default_monster_templates();
        let pick = |roll| select_template(&table, roll).unwrap().name.clone();

        assert_eq!(pick(1), "Slime");
        assert_eq!(pick(40), "Slime");
        assert_eq!(pick(41), "Goblin");
        assert_eq!(pick(75), "Goblin");
        assert_eq!(pick(76), "Skeleton");
        assert_eq!(pick(90), "Skeleton");
        assert_eq!(pick(91), "Orc");
        assert_eq!(pick(100), "Orc");
    }

    #[test]
    fn test_empty_table_selects_nothing() {
        assert!(select_template(&[], 10).is_none());
    }
}
