//! Stats - Immutable snapshot of a character's numeric attributes
//!
//! Every change produces a new `Stats` value. Current pools are always kept
//! inside `0..=max`; callers that push past a bound are clamped to it.

mod leveling;

pub use leveling::{experience_to_next_level, LevelGrowth, EXPERIENCE_PER_LEVEL};

use crate::equipment::WeaponBonuses;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Malformed stat values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("level must be at least 1")]
    ZeroLevel,
    #[error("max hp must be greater than zero")]
    ZeroMaxHp,
    #[error("hp {hp} exceeds max hp {max_hp}")]
    HpAboveMax { hp: u32, max_hp: u32 },
    #[error("mp {mp} exceeds max mp {max_mp}")]
    MpAboveMax { mp: u32, max_mp: u32 },
}

/// Numeric attributes of a character at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StatsBuilder")]
pub struct Stats {
    name: String,
    level: u32,
    hp: u32,
    max_hp: u32,
    mp: u32,
    max_mp: u32,
    strength: u32,
    intelligence: u32,
    agility: u32,
    defense: u32,
    magic_resistance: u32,
}

impl Stats {
    /// Start building a stat line for the named character
    pub fn builder(name: impl Into<String>) -> StatsBuilder {
        StatsBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn mp(&self) -> u32 {
        self.mp
    }

    pub fn max_mp(&self) -> u32 {
        self.max_mp
    }

    pub fn strength(&self) -> u32 {
        self.strength
    }

    pub fn intelligence(&self) -> u32 {
        self.intelligence
    }

    pub fn agility(&self) -> u32 {
        self.agility
    }

    pub fn defense(&self) -> u32 {
        self.defense
    }

    pub fn magic_resistance(&self) -> u32 {
        self.magic_resistance
    }

    /// Current hp as a percentage of max hp (0-100)
    pub fn hp_percent(&self) -> u32 {
        (u64::from(self.hp) * 100 / u64::from(self.max_hp.max(1))) as u32
    }

    /// Copy with hp set, clamped to `0..=max_hp`
    pub fn with_hp(&self, hp: u32) -> Stats {
        Stats {
            hp: hp.min(self.max_hp),
            ..self.clone()
        }
    }

    /// Copy with mp set, clamped to `0..=max_mp`
    pub fn with_mp(&self, mp: u32) -> Stats {
        Stats {
            mp: mp.min(self.max_mp),
            ..self.clone()
        }
    }

    /// Copy with weapon bonuses added to both current and max pools
    pub fn with_bonuses(&self, bonuses: &WeaponBonuses) -> Stats {
        Stats {
            hp: self.hp.saturating_add(bonuses.hp),
            max_hp: self.max_hp.saturating_add(bonuses.hp),
            mp: self.mp.saturating_add(bonuses.mp),
            max_mp: self.max_mp.saturating_add(bonuses.mp),
            agility: self.agility.saturating_add(bonuses.agility),
            defense: self.defense.saturating_add(bonuses.defense),
            ..self.clone()
        }
    }

    /// Copy with weapon bonuses removed from both current and max pools
    ///
    /// A living character is never dropped below 1 hp by losing a bonus.
    pub fn without_bonuses(&self, bonuses: &WeaponBonuses) -> Stats {
        let max_hp = self.max_hp.saturating_sub(bonuses.hp).max(1);
        let hp_floor = u32::from(self.hp > 0);
        let max_mp = self.max_mp.saturating_sub(bonuses.mp);
        Stats {
            hp: self.hp.saturating_sub(bonuses.hp).max(hp_floor).min(max_hp),
            max_hp,
            mp: self.mp.saturating_sub(bonuses.mp).min(max_mp),
            max_mp,
            agility: self.agility.saturating_sub(bonuses.agility),
            defense: self.defense.saturating_sub(bonuses.defense),
            ..self.clone()
        }
    }

    /// Copy advanced by one level, with pools fully restored
    pub fn leveled_up(&self, growth: &LevelGrowth) -> Stats {
        let max_hp = self.max_hp.saturating_add(growth.max_hp);
        let max_mp = self.max_mp.saturating_add(growth.max_mp);
        Stats {
            name: self.name.clone(),
            level: self.level + 1,
            hp: max_hp,
            max_hp,
            mp: max_mp,
            max_mp,
            strength: self.strength.saturating_add(growth.strength),
            intelligence: self.intelligence.saturating_add(growth.intelligence),
            agility: self.agility.saturating_add(growth.agility),
            defense: self.defense.saturating_add(growth.defense),
            magic_resistance: self.magic_resistance.saturating_add(growth.magic_resistance),
        }
    }
}

/// Validating constructor for [`Stats`]
///
/// Current hp/mp default to their maximums when not given.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsBuilder {
    name: String,
    #[serde(default = "default_level")]
    level: u32,
    #[serde(default)]
    hp: Option<u32>,
    max_hp: u32,
    #[serde(default)]
    mp: Option<u32>,
    #[serde(default)]
    max_mp: u32,
    #[serde(default)]
    strength: u32,
    #[serde(default)]
    intelligence: u32,
    #[serde(default)]
    agility: u32,
    #[serde(default)]
    defense: u32,
    #[serde(default)]
    magic_resistance: u32,
}

fn default_level() -> u32 {
    1
}

impl StatsBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        StatsBuilder {
            name: name.into(),
            level: default_level(),
            hp: None,
            max_hp: 0,
            mp: None,
            max_mp: 0,
            strength: 0,
            intelligence: 0,
            agility: 0,
            defense: 0,
            magic_resistance: 0,
        }
    }

    pub fn level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn max_hp(mut self, max_hp: u32) -> Self {
        self.max_hp = max_hp;
        self
    }

    /// Current hp (defaults to max hp)
    pub fn hp(mut self, hp: u32) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn max_mp(mut self, max_mp: u32) -> Self {
        self.max_mp = max_mp;
        self
    }

    /// Current mp (defaults to max mp)
    pub fn mp(mut self, mp: u32) -> Self {
        self.mp = Some(mp);
        self
    }

    pub fn strength(mut self, strength: u32) -> Self {
        self.strength = strength;
        self
    }

    pub fn intelligence(mut self, intelligence: u32) -> Self {
        self.intelligence = intelligence;
        self
    }

    pub fn agility(mut self, agility: u32) -> Self {
        self.agility = agility;
        self
    }

    pub fn defense(mut self, defense: u32) -> Self {
        self.defense = defense;
        self
    }

    pub fn magic_resistance(mut self, magic_resistance: u32) -> Self {
        self.magic_resistance = magic_resistance;
        self
    }

    /// Validate and produce the stat line
    pub fn build(self) -> Result<Stats, StatsError> {
        if self.level == 0 {
            return Err(StatsError::ZeroLevel);
        }
        if self.max_hp == 0 {
            return Err(StatsError::ZeroMaxHp);
        }
        let hp = self.hp.unwrap_or(self.max_hp);
        if hp > self.max_hp {
            return Err(StatsError::HpAboveMax {
                hp,
                max_hp: self.max_hp,
            });
        }
        let mp = self.mp.unwrap_or(self.max_mp);
        if mp > self.max_mp {
            return Err(StatsError::MpAboveMax {
                mp,
                max_mp: self.max_mp,
            });
        }

        Ok(Stats {
            name: self.name,
            level: self.level,
            hp,
            max_hp: self.max_hp,
            mp,
            max_mp: self.max_mp,
            strength: self.strength,
            intelligence: self.intelligence,
            agility: self.agility,
            defense: self.defense,
            magic_resistance: self.magic_resistance,
        })
    }
}

impl TryFrom<StatsBuilder> for Stats {
    type Error = StatsError;

    fn try_from(builder: StatsBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
