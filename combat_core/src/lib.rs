//! combat_core - Turn-based combat resolution engine
//!
//! This library provides:
//! - Stats: Immutable snapshot of a character's numeric attributes
//! - Character: Hero or monster owning stats, skills, inventory and a weapon
//! - DamageStrategy / AiStrategy: Pluggable damage and monster decision logic
//! - Skill: Offensive and support effects with mana costs
//! - CombatService: Turn protocol (attack, skill, item, flee) with observer broadcast
//! - MonsterFactory: Procedural monster generation scaled by floor and difficulty
//! - Roster: Fault-tolerant wrapper over a character persistence collaborator

pub mod ai;
pub mod character;
pub mod combat;
pub mod config;
pub mod damage;
pub mod equipment;
pub mod items;
pub mod monster;
pub mod prelude;
pub mod repository;
pub mod skill;
pub mod stats;
pub mod types;

// Re-export core types for convenience
pub use ai::{AiStrategy, BasicAttackAi, SpellcasterAi};
pub use character::{Character, Role};
pub use combat::{
    ActionOutcome, CombatObserver, CombatService, Encounter, EncounterState, HeroAction,
    MessageLog, Rejection, RoundReport, TracingObserver,
};
pub use config::{default_skills, CombatRules, ConfigError};
pub use damage::{DamageStrategy, PhysicalDamage};
pub use equipment::{Weapon, WeaponBonuses, WeaponType};
pub use items::Consumable;
pub use monster::{FactoryError, MonsterFactory, MonsterTemplate};
pub use repository::{
    CharacterRepository, InMemoryRepository, JsonFileRepository, RepositoryError, Roster,
};
pub use skill::{Polarity, Skill, SkillEffect};
pub use stats::{Stats, StatsBuilder, StatsError};
pub use types::Difficulty;
