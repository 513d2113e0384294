//! Loot - One percentage roll per defeat, mapped to a consumable tier

use crate::items::Consumable;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Minimum roll (1-100) for each loot tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootThresholds {
    /// Roll at or above this drops an Elixir
    #[serde(default = "default_rare")]
    pub rare: u32,
    /// Roll at or above this drops a Mana Potion
    #[serde(default = "default_mana")]
    pub mana: u32,
    /// Roll at or above this drops a Health Potion
    #[serde(default = "default_health")]
    pub health: u32,
}

impl Default for LootThresholds {
    fn default() -> Self {
        LootThresholds {
            rare: default_rare(),
            mana: default_mana(),
            health: default_health(),
        }
    }
}

fn default_rare() -> u32 {
    95
}
fn default_mana() -> u32 {
    70
}
fn default_health() -> u32 {
    40
}

impl LootThresholds {
    /// Map a roll in `1..=100` to the item it yields
    pub fn item_for_roll(&self, roll: u32) -> Option<Consumable> {
        if roll >= self.rare {
            Some(Consumable::Elixir)
        } else if roll >= self.mana {
            Some(Consumable::ManaPotion)
        } else if roll >= self.health {
            Some(Consumable::HealthPotion)
        } else {
            None
        }
    }
}

/// Draw one roll and resolve it, returning both for logging
pub fn roll_loot(thresholds: &LootThresholds, rng: &mut impl Rng) -> (u32, Option<Consumable>) {
    let roll = rng.gen_range(1..=100);
    (roll, thresholds.item_for_roll(roll))
}
