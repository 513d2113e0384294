//! Skills - Mana-costed effects cast on an ally or an enemy

use crate::character::Character;
use crate::damage::MINIMUM_DAMAGE;
use crate::stats::Stats;
use serde::{Deserialize, Serialize};

/// Which side a skill is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Targets the opponent
    Offensive,
    /// Targets the caster's own side
    Support,
}

/// Effect formula of a skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkillEffect {
    /// `intelligence * intelligence_scale + level * level_scale`, reduced by
    /// half the target's magic resistance, never below the minimum damage
    MagicDamage {
        intelligence_scale: u32,
        level_scale: u32,
        #[serde(default = "default_element")]
        element: String,
    },
    /// `intelligence * intelligence_scale` hp restored
    Heal { intelligence_scale: u32 },
}

fn default_element() -> String {
    "magic".to_string()
}

/// A castable skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub mana_cost: u32,
    pub effect: SkillEffect,
}

/// What a cast did to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillOutcome {
    pub polarity: Polarity,
    /// Damage dealt or hp restored by the formula
    pub amount: u32,
}

impl Skill {
    /// Fire bolt: int*2 + level*2 fire damage for 20 mp
    pub fn fireball() -> Self {
        Skill {
            id: "fireball".to_string(),
            name: "Fireball".to_string(),
            description: "Deals magic damage to one target.".to_string(),
            mana_cost: 20,
            effect: SkillEffect::MagicDamage {
                intelligence_scale: 2,
                level_scale: 2,
                element: "fire".to_string(),
            },
        }
    }

    /// Restores int*3 hp for 15 mp
    pub fn heal() -> Self {
        Skill {
            id: "heal".to_string(),
            name: "Heal".to_string(),
            description: "Restores HP to one target.".to_string(),
            mana_cost: 15,
            effect: SkillEffect::Heal {
                intelligence_scale: 3,
            },
        }
    }

    pub fn polarity(&self) -> Polarity {
        match self.effect {
            SkillEffect::MagicDamage { .. } => Polarity::Offensive,
            SkillEffect::Heal { .. } => Polarity::Support,
        }
    }

    pub fn is_support(&self) -> bool {
        self.polarity() == Polarity::Support
    }

    /// Evaluate the effect formula for `caster` against `target`
    pub fn magnitude(&self, caster: &Stats, target: &Stats) -> u32 {
        match &self.effect {
            SkillEffect::MagicDamage {
                intelligence_scale,
                level_scale,
                ..
            } => {
                let raw = caster
                    .intelligence()
                    .saturating_mul(*intelligence_scale)
                    .saturating_add(caster.level().saturating_mul(*level_scale));
                raw.saturating_sub(target.magic_resistance() / 2)
                    .max(MINIMUM_DAMAGE)
            }
            SkillEffect::Heal { intelligence_scale } => {
                caster.intelligence().saturating_mul(*intelligence_scale)
            }
        }
    }

    /// Apply the effect to `target`, announcing the cast and its result
    ///
    /// Mana is not touched here; the combat service pays the cost first.
    pub fn execute(
        &self,
        caster: &Stats,
        target: &mut Character,
        notify: &mut dyn FnMut(&str),
    ) -> SkillOutcome {
        let amount = self.magnitude(caster, target.stats());
        notify(&format!(
            "{} casts {} on {}!",
            caster.name(),
            self.name,
            target.name()
        ));

        match &self.effect {
            SkillEffect::MagicDamage { element, .. } => {
                target.take_damage(amount);
                notify(&format!("{} takes {} {} damage.", target.name(), amount, element));
            }
            SkillEffect::Heal { .. } => {
                target.heal(amount);
                notify(&format!("{} recovers {} HP.", target.name(), amount));
            }
        }

        SkillOutcome {
            polarity: self.polarity(),
            amount,
        }
    }
}
