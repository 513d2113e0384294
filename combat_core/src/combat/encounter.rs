//! Encounter - One hero-versus-monster fight, played a round at a time
//!
//! A round is the hero's action followed, if the fight is still on and the
//! hero's action went through, by the monster's reply.

use super::outcome::{ActionOutcome, EncounterState, Rejection};
use super::service::CombatService;
use crate::character::Character;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the hero does on their turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroAction {
    Attack,
    /// Cast the skill at this index of the hero's skill list
    Cast(usize),
    /// Use the item at this index of the hero's inventory
    UseItem(usize),
    Flee,
}

/// Everything that happened in one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    pub hero: ActionOutcome,
    /// `None` when the monster did not get to act
    pub monster: Option<ActionOutcome>,
    pub state: EncounterState,
}

/// A fight against a single monster
#[derive(Debug)]
pub struct Encounter {
    monster: Character,
    state: EncounterState,
    rounds: u32,
}

impl Encounter {
    pub fn new(monster: Character) -> Self {
        Encounter {
            monster,
            state: EncounterState::Ongoing,
            rounds: 0,
        }
    }

    pub fn monster(&self) -> &Character {
        &self.monster
    }

    pub fn state(&self) -> EncounterState {
        self.state
    }

    /// Rounds in which the hero's action went through
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Give the defeated or escaped-from monster back to the caller
    pub fn into_monster(self) -> Character {
        self.monster
    }

    /// Play the hero's action and then, if appropriate, the monster's turn
    pub fn play_round(
        &mut self,
        service: &mut CombatService,
        hero: &mut Character,
        action: HeroAction,
    ) -> RoundReport {
        if !self.state.is_over() {
            self.state = CombatService::encounter_state(hero, &self.monster);
        }
        if self.state.is_over() {
            return self.report(ActionOutcome::Rejected(Rejection::EncounterOver), None);
        }

        let hero_outcome = self.hero_turn(service, hero, action);
        debug!(?action, outcome = ?hero_outcome, "hero turn");

        if hero_outcome == ActionOutcome::Escaped {
            self.rounds += 1;
            self.state = EncounterState::Fled;
            return self.report(hero_outcome, None);
        }
        if !hero_outcome.consumed_turn() {
            return self.report(hero_outcome, None);
        }
        self.rounds += 1;

        self.state = CombatService::encounter_state(hero, &self.monster);
        if self.state.is_over() {
            return self.report(hero_outcome, None);
        }

        let monster_outcome = self.monster.take_turn(service, hero);
        self.state = CombatService::encounter_state(hero, &self.monster);
        self.report(hero_outcome, Some(monster_outcome))
    }

    fn hero_turn(
        &mut self,
        service: &mut CombatService,
        hero: &mut Character,
        action: HeroAction,
    ) -> ActionOutcome {
        match action {
            HeroAction::Attack => service.process_turn(hero, &mut self.monster),
            HeroAction::Cast(index) => match hero.skills().get(index).cloned() {
                Some(skill) => service.process_skill(hero, &skill, &mut self.monster),
                None => {
                    service.announce(&format!("{} knows no skill in slot {}.", hero.name(), index + 1));
                    ActionOutcome::Rejected(Rejection::NoSuchSkill { index })
                }
            },
            HeroAction::UseItem(index) => service.use_item(hero, index),
            HeroAction::Flee => service.attempt_flee(hero, &self.monster),
        }
    }

    fn report(&self, hero: ActionOutcome, monster: Option<ActionOutcome>) -> RoundReport {
        RoundReport {
            hero,
            monster,
            state: self.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::default_strategy;
    use crate::damage::PhysicalDamage;
    use crate::skill::Skill;
    use crate::stats::Stats;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn service() -> CombatService {
        CombatService::with_rng(PhysicalDamage, ChaCha8Rng::seed_from_u64(11))
    }

    fn goblin(hp: u32) -> Character {
        let stats = Stats::builder("Goblin")
            .max_hp(hp)
            .max_mp(10)
            .mp(0)
            .strength(15)
            .defense(2)
            .build()
            .unwrap();
        Character::monster(stats, default_strategy())
    }

    #[test]
    fn test_round_hero_then_monster() {
        let mut service = service();
        let mut hero = Character::default_hero("Aria").unwrap();
        let mut encounter = Encounter::new(goblin(50));

        let report = encounter.play_round(&mut service, &mut hero, HeroAction::Attack);
        assert_eq!(report.hero, ActionOutcome::Resolved);
        assert_eq!(report.monster, Some(ActionOutcome::Resolved));
        assert_eq!(report.state, EncounterState::Ongoing);
        assert_eq!(encounter.monster().stats().hp(), 42);
        assert_eq!(hero.stats().hp(), 90);
        assert_eq!(encounter.rounds(), 1);
    }

    #[test]
    fn test_victory_skips_monster_turn() {
        let mut service = service();
        let mut hero = Character::default_hero("Aria").unwrap();
        let mut encounter = Encounter::new(goblin(8));

        let report = encounter.play_round(&mut service, &mut hero, HeroAction::Attack);
        assert_eq!(report.hero, ActionOutcome::TargetDefeated);
        assert_eq!(report.monster, None);
        assert_eq!(report.state, EncounterState::HeroVictory);
        assert_eq!(hero.stats().hp(), 100);

        let again = encounter.play_round(&mut service, &mut hero, HeroAction::Attack);
        assert_eq!(again.hero, ActionOutcome::Rejected(Rejection::EncounterOver));
        assert_eq!(hero.experience(), 20);
    }

    #[test]
    fn test_rejected_action_keeps_turn() {
        let mut service = service();
        let mut hero = Character::default_hero("Aria").unwrap();
        let mut encounter = Encounter::new(goblin(50));

        let report = encounter.play_round(&mut service, &mut hero, HeroAction::Cast(3));
        assert_eq!(report.hero, ActionOutcome::Rejected(Rejection::NoSuchSkill { index: 3 }));
        assert_eq!(report.monster, None);
        assert_eq!(hero.stats().hp(), 100);
        assert_eq!(encounter.rounds(), 0);

        hero.learn_skill(Skill::fireball());
        hero.consume_mana(45);
        let report = encounter.play_round(&mut service, &mut hero, HeroAction::Cast(0));
        assert!(matches!(
            report.hero,
            ActionOutcome::Rejected(Rejection::InsufficientMana { .. })
        ));
        assert_eq!(report.monster, None);
    }

    #[test]
    fn test_defeat_ends_encounter() {
        let mut service = service();
        let mut hero = Character::default_hero("Aria").unwrap();
        hero.take_damage(95);
        let mut encounter = Encounter::new(goblin(50));

        let report = encounter.play_round(&mut service, &mut hero, HeroAction::Attack);
        assert_eq!(report.monster, Some(ActionOutcome::TargetDefeated));
        assert_eq!(report.state, EncounterState::HeroDefeat);
        assert!(!hero.is_alive());
    }

    #[test]
    fn test_fallen_hero_ends_encounter_immediately() {
        let mut service = service();
        let mut hero = Character::default_hero("Aria").unwrap();
        hero.take_damage(100);
        let mut encounter = Encounter::new(goblin(50));

        let report = encounter.play_round(&mut service, &mut hero, HeroAction::Attack);
        assert_eq!(report.hero, ActionOutcome::Rejected(Rejection::EncounterOver));
        assert_eq!(report.monster, None);
        assert_eq!(report.state, EncounterState::HeroDefeat);
        assert_eq!(encounter.state(), EncounterState::HeroDefeat);
        assert_eq!(encounter.rounds(), 0);
        assert_eq!(encounter.monster().stats().hp(), 50);
    }

    #[test]
    fn test_monster_slain_elsewhere_counts_as_victory() {
        let mut service = service();
        let mut hero = Character::default_hero("Aria").unwrap();
        let mut goblin = goblin(50);
        goblin.take_damage(50);
        let mut encounter = Encounter::new(goblin);

        let report = encounter.play_round(&mut service, &mut hero, HeroAction::Cast(0));
        assert_eq!(report.hero, ActionOutcome::Rejected(Rejection::EncounterOver));
        assert_eq!(report.state, EncounterState::HeroVictory);
        assert_eq!(hero.experience(), 0);
    }

    #[test]
    fn test_into_monster_returns_fought_monster() {
        let mut service = service();
        let mut hero = Character::default_hero("Aria").unwrap();
        let mut encounter = Encounter::new(goblin(50));
        encounter.play_round(&mut service, &mut hero, HeroAction::Attack);

        let goblin = encounter.into_monster();
        assert_eq!(goblin.name(), "Goblin");
        assert_eq!(goblin.stats().hp(), 42);
    }
}
