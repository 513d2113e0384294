//! Consumable items carried in a character's inventory

use crate::character::Character;
use serde::{Deserialize, Serialize};

/// hp restored by a health potion
pub const HEALTH_POTION_HEAL: u32 = 50;
/// mp restored by a mana potion
pub const MANA_POTION_RESTORE: u32 = 20;

/// A single-use item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Consumable {
    HealthPotion,
    ManaPotion,
    /// Fully restores hp and mp
    Elixir,
    /// Restores a custom amount of hp
    Potion { heal: u32 },
}

/// What using an item actually restored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemEffect {
    pub hp_restored: u32,
    pub mp_restored: u32,
}

impl ItemEffect {
    pub fn summary(&self) -> String {
        match (self.hp_restored, self.mp_restored) {
            (0, 0) => "nothing happens".to_string(),
            (hp, 0) => format!("recovers {} HP", hp),
            (0, mp) => format!("recovers {} MP", mp),
            (hp, mp) => format!("recovers {} HP and {} MP", hp, mp),
        }
    }
}

impl Consumable {
    pub fn name(&self) -> &'static str {
        match self {
            Consumable::HealthPotion => "Health Potion",
            Consumable::ManaPotion => "Mana Potion",
            Consumable::Elixir => "Elixir",
            Consumable::Potion { .. } => "Healing Potion",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Consumable::HealthPotion => format!("Restores {} HP.", HEALTH_POTION_HEAL),
            Consumable::ManaPotion => format!("Restores {} MP.", MANA_POTION_RESTORE),
            Consumable::Elixir => "Fully restores HP and MP.".to_string(),
            Consumable::Potion { heal } => format!("Restores {} HP.", heal),
        }
    }

    /// Apply the item to `target`
    pub fn apply(&self, target: &mut Character) -> ItemEffect {
        match self {
            Consumable::HealthPotion => ItemEffect {
                hp_restored: target.heal(HEALTH_POTION_HEAL),
                mp_restored: 0,
            },
            Consumable::ManaPotion => ItemEffect {
                hp_restored: 0,
                mp_restored: target.restore_mana(MANA_POTION_RESTORE),
            },
            Consumable::Elixir => {
                let max_hp = target.stats().max_hp();
                let max_mp = target.stats().max_mp();
                ItemEffect {
                    hp_restored: target.heal(max_hp),
                    mp_restored: target.restore_mana(max_mp),
                }
            }
            Consumable::Potion { heal } => ItemEffect {
                hp_restored: target.heal(*heal),
                mp_restored: 0,
            },
        }
    }
}
