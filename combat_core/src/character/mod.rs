//! Character - A hero or monster taking part in combat
//!
//! A character owns one [`Stats`] snapshot and replaces it on every change.
//! Only monsters carry an [`AiStrategy`].

use crate::ai::{self, AiStrategy};
use crate::combat::{ActionOutcome, CombatService};
use crate::equipment::Weapon;
use crate::items::Consumable;
use crate::skill::Skill;
use crate::stats::{experience_to_next_level, LevelGrowth, Stats, StatsError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Which side of the fight a character is on
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Role {
    Hero,
    Monster {
        #[serde(skip, default = "ai::default_strategy")]
        ai: Arc<dyn AiStrategy>,
    },
}

impl fmt::Debug for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Hero => f.write_str("Hero"),
            Role::Monster { ai } => f.debug_struct("Monster").field("ai", &ai.name()).finish(),
        }
    }
}

/// A combatant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    stats: Stats,
    #[serde(flatten)]
    role: Role,
    #[serde(default)]
    skills: Vec<Skill>,
    #[serde(default)]
    inventory: Vec<Consumable>,
    #[serde(default)]
    weapon: Option<Weapon>,
    #[serde(default)]
    experience: u32,
}

impl Character {
    /// Create a player-controlled hero
    pub fn hero(stats: Stats) -> Self {
        Self::with_role(stats, Role::Hero)
    }

    /// Create a monster driven by `ai`
    pub fn monster(stats: Stats, ai: Arc<dyn AiStrategy>) -> Self {
        Self::with_role(stats, Role::Monster { ai })
    }

    /// Level 1 hero with the stock stat line
    pub fn default_hero(name: impl Into<String>) -> Result<Self, StatsError> {
        let stats = Stats::builder(name)
            .max_hp(100)
            .max_mp(50)
            .strength(10)
            .intelligence(5)
            .agility(5)
            .defense(5)
            .build()?;
        Ok(Self::hero(stats))
    }

    fn with_role(stats: Stats, role: Role) -> Self {
        Character {
            stats,
            role,
            skills: Vec::new(),
            inventory: Vec::new(),
            weapon: None,
            experience: 0,
        }
    }

    // === Identity ===

    pub fn name(&self) -> &str {
        self.stats.name()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn is_hero(&self) -> bool {
        matches!(self.role, Role::Hero)
    }

    /// The monster's decision strategy, if any
    pub fn ai(&self) -> Option<Arc<dyn AiStrategy>> {
        match &self.role {
            Role::Hero => None,
            Role::Monster { ai } => Some(Arc::clone(ai)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.stats.hp() > 0
    }

    // === Skills and inventory ===

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn learn_skill(&mut self, skill: Skill) {
        self.skills.push(skill);
    }

    pub fn inventory(&self) -> &[Consumable] {
        &self.inventory
    }

    pub fn add_item(&mut self, item: Consumable) {
        self.inventory.push(item);
    }

    /// Take the item at `index` out of the inventory
    pub fn remove_item(&mut self, index: usize) -> Option<Consumable> {
        if index < self.inventory.len() {
            Some(self.inventory.remove(index))
        } else {
            None
        }
    }

    // === Resource mutators ===

    /// Lose up to `amount` hp, stopping at 0. Returns hp actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.stats.hp();
        self.stats = self.stats.with_hp(before.saturating_sub(amount));
        before - self.stats.hp()
    }

    /// Regain up to `amount` hp, stopping at max hp. Returns hp actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.stats.hp();
        self.stats = self.stats.with_hp(before.saturating_add(amount));
        self.stats.hp() - before
    }

    /// Spend up to `amount` mp, stopping at 0. Returns mp actually spent.
    ///
    /// Does not check affordability; callers compare against the current mp first.
    pub fn consume_mana(&mut self, amount: u32) -> u32 {
        let before = self.stats.mp();
        self.stats = self.stats.with_mp(before.saturating_sub(amount));
        before - self.stats.mp()
    }

    /// Regain up to `amount` mp, stopping at max mp. Returns mp actually gained.
    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        let before = self.stats.mp();
        self.stats = self.stats.with_mp(before.saturating_add(amount));
        self.stats.mp() - before
    }

    // === Equipment ===

    pub fn weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    /// Swap the equipped weapon, returning the previous one
    ///
    /// The previous weapon's bonuses come off before the new weapon's go on,
    /// so equipping and then unequipping restores the original numbers.
    pub fn equip_weapon(&mut self, weapon: Option<Weapon>) -> Option<Weapon> {
        let previous = self.weapon.take();
        if let Some(old) = &previous {
            self.stats = self.stats.without_bonuses(&old.bonuses);
        }
        if let Some(new) = &weapon {
            self.stats = self.stats.with_bonuses(&new.bonuses);
        }
        self.weapon = weapon;
        previous
    }

    /// Strength plus the equipped weapon's damage bonus
    pub fn physical_attack(&self) -> u32 {
        let weapon_bonus = self.weapon.as_ref().map_or(0, |w| w.damage_bonus);
        self.stats.strength().saturating_add(weapon_bonus)
    }

    // === Progression ===

    /// Experience carried toward the next level
    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn experience_to_next_level(&self) -> u32 {
        experience_to_next_level(self.stats.level())
    }

    /// Gain experience with the default growth table. Returns levels gained.
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        self.gain_experience_with(amount, &LevelGrowth::default())
    }

    /// Gain experience, levelling up as many times as the total allows
    ///
    /// Surplus carries into the next level and each threshold is checked
    /// against the level reached so far.
    pub fn gain_experience_with(&mut self, amount: u32, growth: &LevelGrowth) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        let mut levels = 0;
        while self.experience >= self.experience_to_next_level() {
            self.experience -= self.experience_to_next_level();
            self.stats = self.stats.leveled_up(growth);
            levels += 1;
        }
        levels
    }

    // === Turn ===

    /// Act once against `target`
    ///
    /// Monsters defer to their AI strategy; a hero without one simply attacks.
    pub fn take_turn(&mut self, service: &mut CombatService, target: &mut Character) -> ActionOutcome {
        match self.ai() {
            Some(ai) => ai.execute_action(service, self, target),
            None => service.process_turn(self, target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::BasicAttackAi;
    use crate::equipment::{WeaponBonuses, WeaponType};

    fn hero() -> Character {
        Character::default_hero("Aria").unwrap()
    }

    #[test]
    fn test_alive_tracks_hp() {
        let mut hero = hero();
        assert!(hero.is_alive());
        assert_eq!(hero.take_damage(100), 100);
        assert!(!hero.is_alive());
    }

    #[test]
    fn test_damage_and_heal_clamp() {
        let mut hero = hero();
        assert_eq!(hero.take_damage(50), 50);
        assert_eq!(hero.stats().hp(), 50);
        assert_eq!(hero.heal(20), 20);
        assert_eq!(hero.stats().hp(), 70);
        assert_eq!(hero.heal(100), 30);
        assert_eq!(hero.stats().hp(), 100);
        assert_eq!(hero.take_damage(1000), 100);
        assert_eq!(hero.stats().hp(), 0);
    }

    #[test]
    fn test_mana_clamps() {
        let mut hero = hero();
        assert_eq!(hero.consume_mana(80), 50);
        assert_eq!(hero.stats().mp(), 0);
        assert_eq!(hero.restore_mana(500), 50);
        assert_eq!(hero.stats().mp(), 50);
    }

    #[test]
    fn test_physical_attack_includes_weapon() {
        let mut hero = hero();
        assert_eq!(hero.physical_attack(), 10);
        hero.equip_weapon(Some(Weapon::new("Axe", 6, WeaponType::Axe)));
        assert_eq!(hero.physical_attack(), 16);
    }

    #[test]
    fn test_weapon_swap_is_symmetric() {
        let mut hero = hero();
        let before = hero.stats().clone();

        let sword = Weapon::new("Greatsword", 8, WeaponType::Sword).with_bonuses(WeaponBonuses {
            hp: 10,
            ..WeaponBonuses::default()
        });
        let staff = Weapon::new("Staff", 5, WeaponType::Staff).with_bonuses(WeaponBonuses {
            mp: 20,
            agility: 1,
            defense: 2,
            ..WeaponBonuses::default()
        });

        assert!(hero.equip_weapon(Some(sword.clone())).is_none());
        assert_eq!(hero.stats().max_hp(), 110);
        assert_eq!(hero.equip_weapon(Some(staff)), Some(sword));
        assert_eq!(hero.stats().max_hp(), 100);
        assert_eq!(hero.stats().max_mp(), 70);
        hero.equip_weapon(None);

        assert_eq!(hero.stats(), &before);
        assert!(hero.weapon().is_none());
    }

    #[test]
    fn test_single_level_up_carries_surplus() {
        let mut hero = hero();
        hero.take_damage(40);
        assert_eq!(hero.gain_experience(250), 1);
        assert_eq!(hero.stats().level(), 2);
        assert_eq!(hero.experience(), 150);
        assert_eq!(hero.stats().hp(), 110);
    }

    #[test]
    fn test_level_up_cascades() {
        let mut hero = hero();
        assert_eq!(hero.gain_experience(300), 2);
        assert_eq!(hero.stats().level(), 3);
        assert_eq!(hero.experience(), 0);

        assert_eq!(hero.gain_experience(299), 0);
        assert_eq!(hero.gain_experience(1 + 400 + 500), 3);
        assert_eq!(hero.stats().level(), 6);
        assert_eq!(hero.experience(), 0);
    }

    #[test]
    fn test_remove_item_out_of_range() {
        let mut hero = hero();
        hero.add_item(Consumable::HealthPotion);
        assert!(hero.remove_item(3).is_none());
        assert_eq!(hero.remove_item(0), Some(Consumable::HealthPotion));
        assert!(hero.inventory().is_empty());
    }

    #[test]
    fn test_monster_serde_restores_default_ai() {
        let stats = Stats::builder("Slime Lvl 1").max_hp(30).build().unwrap();
        let monster = Character::monster(stats, Arc::new(BasicAttackAi));
        let json = serde_json::to_string(&monster).unwrap();
        assert!(json.contains(r#""role":"monster""#));

        let back: Character = serde_json::from_str(&json).unwrap();
        assert!(!back.is_hero());
        assert_eq!(back.ai().map(|ai| ai.name().to_string()), Some("basic_attack".to_string()));
    }

    #[test]
    fn test_hero_serde_roundtrip() {
        let mut hero = hero();
        hero.learn_skill(Skill::heal());
        hero.add_item(Consumable::ManaPotion);
        hero.equip_weapon(Some(Weapon::new("Dagger", 3, WeaponType::Dagger)));
        hero.gain_experience(40);

        let json = serde_json::to_string(&hero).unwrap();
        let back: Character = serde_json::from_str(&json).unwrap();
        assert!(back.is_hero());
        assert_eq!(back.stats(), hero.stats());
        assert_eq!(back.skills(), hero.skills());
        assert_eq!(back.inventory(), hero.inventory());
        assert_eq!(back.weapon(), hero.weapon());
        assert_eq!(back.experience(), 40);
    }
}
