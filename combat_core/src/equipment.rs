//! Weapons - Flat damage plus pool/attribute bonuses
//!
//! Equipping is a delta operation on the wearer's stats: the previous weapon's
//! bonuses are removed before the new weapon's are added. See
//! [`Character::equip_weapon`](crate::character::Character::equip_weapon).

use serde::{Deserialize, Serialize};

/// Weapon family (cosmetic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    Sword,
    Axe,
    Staff,
    Dagger,
    Bow,
    Hammer,
    Mace,
}

/// Bonuses a weapon grants while equipped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponBonuses {
    /// Added to both hp and max hp
    #[serde(default)]
    pub hp: u32,
    /// Added to both mp and max mp
    #[serde(default)]
    pub mp: u32,
    #[serde(default)]
    pub agility: u32,
    #[serde(default)]
    pub defense: u32,
}

impl WeaponBonuses {
    pub fn is_empty(&self) -> bool {
        *self == WeaponBonuses::default()
    }
}

/// An equippable weapon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    /// Flat bonus added to physical attack
    pub damage_bonus: u32,
    pub weapon_type: WeaponType,
    #[serde(default)]
    pub bonuses: WeaponBonuses,
}

impl Weapon {
    /// Create a weapon with no stat bonuses
    pub fn new(name: impl Into<String>, damage_bonus: u32, weapon_type: WeaponType) -> Self {
        Weapon {
            name: name.into(),
            damage_bonus,
            weapon_type,
            bonuses: WeaponBonuses::default(),
        }
    }

    /// Attach stat bonuses
    pub fn with_bonuses(mut self, bonuses: WeaponBonuses) -> Self {
        self.bonuses = bonuses;
        self
    }

    /// Short description, e.g. "Longbow (+6 dmg, +10 hp, +3 agi)"
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("+{} dmg", self.damage_bonus)];
        if self.bonuses.hp > 0 {
            parts.push(format!("+{} hp", self.bonuses.hp));
        }
        if self.bonuses.mp > 0 {
            parts.push(format!("+{} mp", self.bonuses.mp));
        }
        if self.bonuses.agility > 0 {
            parts.push(format!("+{} agi", self.bonuses.agility));
        }
        if self.bonuses.defense > 0 {
            parts.push(format!("+{} def", self.bonuses.defense));
        }
        format!("{} ({})", self.name, parts.join(", "))
    }
}
