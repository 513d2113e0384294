//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::character::Character;
pub use crate::stats::Stats;
pub use crate::types::Difficulty;

// Combat
pub use crate::combat::{
    ActionOutcome, CombatObserver, CombatService, Encounter, EncounterState, HeroAction,
};

// Strategies
pub use crate::ai::{AiStrategy, BasicAttackAi};
pub use crate::damage::{DamageStrategy, PhysicalDamage};

// Content
pub use crate::equipment::{Weapon, WeaponType};
pub use crate::items::Consumable;
pub use crate::monster::MonsterFactory;
pub use crate::skill::Skill;
