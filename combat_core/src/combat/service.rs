//! CombatService - Resolves attacks, skills, items and escapes
//!
//! Every state change made by the service is announced to the attached
//! observers, in the order it happens. Defeat handling (experience, level
//! ups and the loot roll) runs inside the action that caused the defeat.

use super::loot::roll_loot;
use super::observer::{broadcast, CombatObserver};
use super::outcome::{ActionOutcome, EncounterState, Rejection};
use crate::character::Character;
use crate::config::CombatRules;
use crate::damage::{DamageStrategy, PhysicalDamage};
use crate::skill::{Polarity, Skill};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Turn resolver shared by the hero's driver and monster AI
pub struct CombatService {
    observers: Vec<Arc<dyn CombatObserver>>,
    damage_strategy: Box<dyn DamageStrategy>,
    rules: CombatRules,
    rng: Box<dyn RngCore + Send>,
}

impl fmt::Debug for CombatService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombatService")
            .field("observers", &self.observers.len())
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl Default for CombatService {
    fn default() -> Self {
        Self::new(PhysicalDamage)
    }
}

impl CombatService {
    /// Create a service with an entropy-seeded random source
    pub fn new(damage_strategy: impl DamageStrategy + 'static) -> Self {
        Self::with_rng(damage_strategy, StdRng::from_entropy())
    }

    /// Create a service drawing loot and flee rolls from `rng`
    pub fn with_rng(
        damage_strategy: impl DamageStrategy + 'static,
        rng: impl RngCore + Send + 'static,
    ) -> Self {
        CombatService {
            observers: Vec::new(),
            damage_strategy: Box::new(damage_strategy),
            rules: CombatRules::default(),
            rng: Box::new(rng),
        }
    }

    pub fn with_rules(mut self, rules: CombatRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &CombatRules {
        &self.rules
    }

    /// Register an observer; notifications reach observers in attach order
    pub fn attach(&mut self, observer: Arc<dyn CombatObserver>) {
        self.observers.push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Send a free-form message to every observer
    pub fn announce(&self, message: &str) {
        broadcast(&self.observers, message);
    }

    /// Basic attack from `attacker` against `defender`
    ///
    /// Does nothing if either side is already down.
    pub fn process_turn(&mut self, attacker: &mut Character, defender: &mut Character) -> ActionOutcome {
        if !attacker.is_alive() {
            return ActionOutcome::Rejected(Rejection::ActorDown);
        }
        if !defender.is_alive() {
            return ActionOutcome::Rejected(Rejection::TargetDown);
        }

        self.announce(&format!("{} attacks {}!", attacker.name(), defender.name()));
        let damage = self.damage_strategy.calculate_damage(attacker, defender);
        defender.take_damage(damage);
        self.announce(&format!(
            "{} takes {} damage. HP left: {}",
            defender.name(),
            damage,
            defender.stats().hp()
        ));

        if defender.is_alive() {
            ActionOutcome::Resolved
        } else {
            self.handle_defeat(attacker, defender);
            ActionOutcome::TargetDefeated
        }
    }

    /// Cast `skill` as `user`
    ///
    /// Support skills land on `user`, offensive skills on `opponent`. Mana is
    /// only spent when the whole cost can be paid.
    pub fn process_skill(
        &mut self,
        user: &mut Character,
        skill: &Skill,
        opponent: &mut Character,
    ) -> ActionOutcome {
        if !user.is_alive() {
            return ActionOutcome::Rejected(Rejection::ActorDown);
        }
        let polarity = skill.polarity();
        if polarity == Polarity::Offensive && !opponent.is_alive() {
            return ActionOutcome::Rejected(Rejection::TargetDown);
        }

        let available = user.stats().mp();
        if available < skill.mana_cost {
            self.announce(&format!(
                "{} tries to cast {} but does not have enough mana!",
                user.name(),
                skill.name
            ));
            return ActionOutcome::Rejected(Rejection::InsufficientMana {
                required: skill.mana_cost,
                available,
            });
        }

        user.consume_mana(skill.mana_cost);
        let caster = user.stats().clone();
        let observers = &self.observers;
        let mut notify = |message: &str| broadcast(observers, message);

        match polarity {
            Polarity::Support => {
                skill.execute(&caster, user, &mut notify);
                ActionOutcome::Resolved
            }
            Polarity::Offensive => {
                skill.execute(&caster, opponent, &mut notify);
                if opponent.is_alive() {
                    ActionOutcome::Resolved
                } else {
                    self.handle_defeat(user, opponent);
                    ActionOutcome::TargetDefeated
                }
            }
        }
    }

    /// Consume the inventory item at `index`
    pub fn use_item(&mut self, user: &mut Character, index: usize) -> ActionOutcome {
        if !user.is_alive() {
            return ActionOutcome::Rejected(Rejection::ActorDown);
        }
        let Some(item) = user.remove_item(index) else {
            self.announce(&format!("{} has no item in slot {}.", user.name(), index + 1));
            return ActionOutcome::Rejected(Rejection::NoSuchItem { index });
        };

        self.announce(&format!("{} uses {}.", user.name(), item.name()));
        let effect = item.apply(user);
        self.announce(&format!("{} {}.", user.name(), effect.summary()));
        ActionOutcome::Resolved
    }

    /// Try to leave the fight; the roll uses the configured flee chance
    pub fn attempt_flee(&mut self, hero: &mut Character, monster: &Character) -> ActionOutcome {
        if !hero.is_alive() {
            return ActionOutcome::Rejected(Rejection::ActorDown);
        }

        let chance = self
            .rules
            .flee
            .chance(hero.stats().agility(), monster.stats().agility());
        let roll: u32 = self.rng.gen_range(1..=100);
        debug!(roll, chance, "flee roll");

        if roll <= chance {
            self.announce(&format!("{} escapes from {}!", hero.name(), monster.name()));
            ActionOutcome::Escaped
        } else {
            self.announce(&format!("{} fails to escape!", hero.name()));
            ActionOutcome::Resolved
        }
    }

    /// Current state of a hero-versus-monster fight, hero loss first
    pub fn encounter_state(hero: &Character, monster: &Character) -> EncounterState {
        if !hero.is_alive() {
            EncounterState::HeroDefeat
        } else if !monster.is_alive() {
            EncounterState::HeroVictory
        } else {
            EncounterState::Ongoing
        }
    }

    fn handle_defeat(&mut self, winner: &mut Character, loser: &Character) {
        self.announce(&format!("{} has been defeated!", loser.name()));
        if !winner.is_hero() {
            return;
        }

        let experience = loser
            .stats()
            .level()
            .saturating_mul(self.rules.experience_per_level);
        self.announce(&format!("{} gains {} XP!", winner.name(), experience));
        let levels = winner.gain_experience_with(experience, &self.rules.level_growth);
        if levels > 0 {
            self.announce(&format!(
                "{} reaches level {}!",
                winner.name(),
                winner.stats().level()
            ));
        }

        let (roll, item) = roll_loot(&self.rules.loot, &mut self.rng);
        debug!(roll, loot = ?item, "loot roll for {}", loser.name());
        if let Some(item) = item {
            self.announce(&format!("Loot! You found: {}", item.name()));
            winner.add_item(item);
        }
    }
}
