//! AI strategies - How a monster spends its turn
//!
//! A strategy performs exactly one combat-affecting action per call through
//! the [`CombatService`], or nothing when the monster is already down.

use crate::character::Character;
use crate::combat::{ActionOutcome, CombatService, Rejection};
use crate::skill::Polarity;
use std::sync::Arc;
use tracing::debug;

/// Decision logic for a computer-controlled character
pub trait AiStrategy: Send + Sync {
    /// Identifier used in logs and debug output
    fn name(&self) -> &str;

    /// Take one action on behalf of `monster` against `target`
    fn execute_action(
        &self,
        service: &mut CombatService,
        monster: &mut Character,
        target: &mut Character,
    ) -> ActionOutcome;
}

/// The strategy monsters get when none is specified
pub fn default_strategy() -> Arc<dyn AiStrategy> {
    Arc::new(BasicAttackAi)
}

/// Always issues a basic attack
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicAttackAi;

impl AiStrategy for BasicAttackAi {
    fn name(&self) -> &str {
        "basic_attack"
    }

    fn execute_action(
        &self,
        service: &mut CombatService,
        monster: &mut Character,
        target: &mut Character,
    ) -> ActionOutcome {
        service.process_turn(monster, target)
    }
}

/// Heals when hurt, otherwise casts the first affordable offensive skill,
/// otherwise attacks
#[derive(Debug, Clone, Copy)]
pub struct SpellcasterAi {
    /// Heal when hp falls below this percentage of max hp
    pub heal_below_percent: u32,
}

impl Default for SpellcasterAi {
    fn default() -> Self {
        SpellcasterAi {
            heal_below_percent: 30,
        }
    }
}

impl AiStrategy for SpellcasterAi {
    fn name(&self) -> &str {
        "spellcaster"
    }

    fn execute_action(
        &self,
        service: &mut CombatService,
        monster: &mut Character,
        target: &mut Character,
    ) -> ActionOutcome {
        if !monster.is_alive() {
            return ActionOutcome::Rejected(Rejection::ActorDown);
        }

        let mp = monster.stats().mp();
        let wounded = monster.stats().hp_percent() < self.heal_below_percent;
        let affordable = |polarity: Polarity| {
            monster
                .skills()
                .iter()
                .find(|s| s.polarity() == polarity && s.mana_cost <= mp)
                .cloned()
        };

        let choice = if wounded {
            affordable(Polarity::Support).or_else(|| affordable(Polarity::Offensive))
        } else {
            affordable(Polarity::Offensive)
        };

        match choice {
            Some(skill) => {
                debug!("{} chooses {}", monster.name(), skill.name);
                service.process_skill(monster, &skill, target)
            }
            None => service.process_turn(monster, target),
        }
    }
}
