//! MonsterFactory - Procedural monsters for a floor and difficulty

mod template;

pub use template::{select_template, MonsterTemplate, MONSTER_MAX_MP};

use crate::ai::{self, AiStrategy};
use crate::character::Character;
use crate::config::{default_monster_templates, load_monster_templates, ConfigError};
use crate::stats::StatsError;
use crate::types::Difficulty;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Monster generation error
#[derive(Error, Debug)]
pub enum FactoryError {
    #[error("Floor must be at least 1, got {0}")]
    InvalidFloor(u32),
    #[error("No monster templates configured")]
    NoTemplates,
    #[error("Monster template '{0}' has zero weight")]
    ZeroWeight(String),
    #[error("Invalid monster stats: {0}")]
    Stats(#[from] StatsError),
    #[error("Failed to load monster templates: {0}")]
    Config(#[from] ConfigError),
}

/// Builds scaled monsters from a weighted template table
pub struct MonsterFactory {
    templates: Vec<MonsterTemplate>,
    ai: Arc<dyn AiStrategy>,
    rng: Box<dyn RngCore + Send>,
}

impl fmt::Debug for MonsterFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonsterFactory")
            .field("templates", &self.templates)
            .field("ai", &self.ai.name())
            .finish_non_exhaustive()
    }
}

impl Default for MonsterFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl MonsterFactory {
    /// Factory over the built-in table with an entropy-seeded random source
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Factory over the built-in table drawing from `rng`
    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        MonsterFactory {
            templates: default_monster_templates(),
            ai: ai::default_strategy(),
            rng: Box::new(rng),
        }
    }

    /// Replace the template table
    pub fn with_templates(mut self, templates: Vec<MonsterTemplate>) -> Result<Self, FactoryError> {
        if templates.is_empty() {
            return Err(FactoryError::NoTemplates);
        }
        if let Some(template) = templates.iter().find(|t| t.weight == 0) {
            return Err(FactoryError::ZeroWeight(template.name.clone()));
        }
        self.templates = templates;
        Ok(self)
    }

    /// Replace the template table with one loaded from a TOML file
    pub fn with_template_file(self, path: &Path) -> Result<Self, FactoryError> {
        let templates = load_monster_templates(path)?;
        self.with_templates(templates)
    }

    /// Strategy attached to every monster built from now on
    pub fn with_ai(mut self, ai: Arc<dyn AiStrategy>) -> Self {
        self.ai = ai;
        self
    }

    /// Swap the strategy on an existing factory
    pub fn set_ai(&mut self, ai: Arc<dyn AiStrategy>) {
        self.ai = ai;
    }

    pub fn templates(&self) -> &[MonsterTemplate] {
        &self.templates
    }

    /// Roll a template and scale it for `floor`
    pub fn create_random_monster(
        &mut self,
        floor: u32,
        difficulty: Difficulty,
    ) -> Result<Character, FactoryError> {
        let roll = self.rng.gen_range(1..=100);
        self.create_from_roll(roll, floor, difficulty)
    }

    /// Build the monster a given selection roll would produce
    pub fn create_from_roll(
        &self,
        roll: u32,
        floor: u32,
        difficulty: Difficulty,
    ) -> Result<Character, FactoryError> {
        if floor == 0 {
            return Err(FactoryError::InvalidFloor(floor));
        }
        let template = select_template(&self.templates, roll).ok_or(FactoryError::NoTemplates)?;
        let stats = template.scaled(floor, difficulty)?;
        debug!(roll, floor, %difficulty, template = %template.name, "spawned monster");
        Ok(Character::monster(stats, self.ai.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::SpellcasterAi;
    use rand_chacha::ChaCha8Rng;

    fn factory() -> MonsterFactory {
        MonsterFactory::with_rng(ChaCha8Rng::seed_from_u64(42))
    }

    #[test]
    fn test_orc_from_roll() {
        let orc = factory().create_from_roll(95, 5, Difficulty::Hard).unwrap();
        assert_eq!(orc.name(), "Orc Lvl 5");
        assert_eq!(orc.stats().max_hp(), 195);
        assert_eq!(orc.stats().strength(), 27);
        assert!(!orc.is_hero());
        assert_eq!(orc.ai().unwrap().name(), "basic_attack");
    }

    #[test]
    fn test_floor_zero_rejected() {
        let result = factory().create_random_monster(0, Difficulty::Normal);
        assert!(matches!(result, Err(FactoryError::InvalidFloor(0))));
    }

    #[test]
    fn test_random_monsters_are_fresh() {
        let mut factory = factory();
        for floor in 1..=20 {
            let monster = factory.create_random_monster(floor, Difficulty::Normal).unwrap();
            assert_eq!(monster.stats().level(), floor);
            assert_eq!(monster.stats().hp(), monster.stats().max_hp());
            assert!(monster.name().ends_with(&format!("Lvl {}", floor)));
        }
    }

    #[test]
    fn test_seeded_factories_agree() {
        let mut a = factory();
        let mut b = factory();
        for floor in 1..=10 {
            let left = a.create_random_monster(floor, Difficulty::Hard).unwrap();
            let right = b.create_random_monster(floor, Difficulty::Hard).unwrap();
            assert_eq!(left.name(), right.name());
        }
    }

    #[test]
    fn test_custom_table_and_ai() {
        let factory = factory()
            .with_templates(vec![MonsterTemplate::new("Wisp", 1, 10, 3, 0, 9)])
            .unwrap()
            .with_ai(Arc::new(SpellcasterAi::default()));

        let wisp = factory.create_from_roll(77, 2, Difficulty::Normal).unwrap();
        assert_eq!(wisp.name(), "Wisp Lvl 2");
        assert_eq!(wisp.ai().unwrap().name(), "spellcaster");
    }

    #[test]
    fn test_missing_template_file() {
        let result = factory().with_template_file(Path::new("/nonexistent/monsters.toml"));
        assert!(matches!(result, Err(FactoryError::Config(ConfigError::IoError(_)))));
    }

    #[test]
    fn test_bad_tables_rejected() {
        assert!(matches!(factory().with_templates(vec![]), Err(FactoryError::NoTemplates)));
        let zero = vec![MonsterTemplate::new("Ghost", 0, 10, 1, 0, 0)];
        assert!(matches!(
            factory().with_templates(zero),
            Err(FactoryError::ZeroWeight(name)) if name == "Ghost"
        ));
    }

    #[test]
    fn test_templates_reflect_table() {
        assert_eq!(factory().templates().len(), 4);

        let factory = factory()
            .with_templates(vec![MonsterTemplate::new("Wisp", 1, 10, 3, 0, 9)])
            .unwrap();
        assert_eq!(factory.templates(), &[MonsterTemplate::new("Wisp", 1, 10, 3, 0, 9)]);
    }
}
