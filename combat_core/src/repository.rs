//! Character persistence
//!
//! Repositories key characters by name; saving a character whose name is
//! already stored replaces the earlier record.

use crate::character::Character;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Persistence error
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage for characters keyed by name
pub trait CharacterRepository {
    /// Insert or replace the character with the same name
    fn save(&mut self, character: &Character) -> Result<(), RepositoryError>;

    fn get_by_name(&self, name: &str) -> Result<Option<Character>, RepositoryError>;

    /// Every stored character, in insertion order
    fn get_all(&self) -> Result<Vec<Character>, RepositoryError>;
}

fn upsert(characters: &mut Vec<Character>, character: &Character) {
    match characters.iter_mut().find(|c| c.name() == character.name()) {
        Some(existing) => *existing = character.clone(),
        None => characters.push(character.clone()),
    }
}

/// Repository that lives only as long as the process
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    characters: Vec<Character>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CharacterRepository for InMemoryRepository {
    fn save(&mut self, character: &Character) -> Result<(), RepositoryError> {
        upsert(&mut self.characters, character);
        Ok(())
    }

    fn get_by_name(&self, name: &str) -> Result<Option<Character>, RepositoryError> {
        Ok(self.characters.iter().find(|c| c.name() == name).cloned())
    }

    fn get_all(&self) -> Result<Vec<Character>, RepositoryError> {
        Ok(self.characters.clone())
    }
}

/// Repository backed by a single JSON array on disk
///
/// A missing file reads as an empty roster. Writes go to a temporary file
/// that is then renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonFileRepository {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<Character>, RepositoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&self.path)?;
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&json)?)
    }

    fn write(&self, characters: &[Character]) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let temp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(characters)?;
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;
        debug!("Saved {} characters to {}", characters.len(), self.path.display());
        Ok(())
    }
}

impl CharacterRepository for JsonFileRepository {
    fn save(&mut self, character: &Character) -> Result<(), RepositoryError> {
        let mut characters = self.read()?;
        upsert(&mut characters, character);
        self.write(&characters)
    }

    fn get_by_name(&self, name: &str) -> Result<Option<Character>, RepositoryError> {
        Ok(self.read()?.into_iter().find(|c| c.name() == name))
    }

    fn get_all(&self) -> Result<Vec<Character>, RepositoryError> {
        self.read()
    }
}

/// Convenience front for a repository that logs failures instead of
/// returning them
#[derive(Debug)]
pub struct Roster<R> {
    repository: R,
}

impl<R: CharacterRepository> Roster<R> {
    pub fn new(repository: R) -> Self {
        Roster { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Returns whether the character was stored
    pub fn save(&mut self, character: &Character) -> bool {
        match self.repository.save(character) {
            Ok(()) => true,
            Err(err) => {
                warn!("Failed to save {}: {}", character.name(), err);
                false
            }
        }
    }

    pub fn find(&self, name: &str) -> Option<Character> {
        self.repository.get_by_name(name).unwrap_or_else(|err| {
            warn!("Failed to look up {}: {}", name, err);
            None
        })
    }

    pub fn all(&self) -> Vec<Character> {
        self.repository.get_all().unwrap_or_else(|err| {
            warn!("Failed to list characters: {}", err);
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::default_strategy;
    use crate::items::Consumable;
    use crate::skill::Skill;
    use crate::stats::Stats;

    fn hero(name: &str) -> Character {
        let mut hero = Character::default_hero(name).unwrap();
        hero.learn_skill(Skill::fireball());
        hero.add_item(Consumable::ManaPotion);
        hero
    }

    #[test]
    fn test_in_memory_replaces_by_name() {
        let mut repo = InMemoryRepository::new();
        let mut aria = hero("Aria");
        repo.save(&aria).unwrap();
        repo.save(&hero("Bram")).unwrap();

        aria.gain_experience(150);
        repo.save(&aria).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name(), "Aria");
        assert_eq!(all[0].stats().level(), 2);
        assert!(repo.get_by_name("Cato").unwrap().is_none());
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = JsonFileRepository::new(dir.path().join("saves/heroes.json"));
        assert!(repo.get_all().unwrap().is_empty());

        let mut aria = hero("Aria");
        aria.take_damage(30);
        repo.save(&aria).unwrap();
        aria.take_damage(10);
        repo.save(&aria).unwrap();

        let loaded = repo.get_by_name("Aria").unwrap().unwrap();
        assert_eq!(loaded.stats().hp(), 60);
        assert_eq!(loaded.skills(), aria.skills());
        assert_eq!(loaded.inventory(), &[Consumable::ManaPotion]);
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_json_file_restores_monster_ai() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = JsonFileRepository::new(dir.path().join("monsters.json"));
        let stats = Stats::builder("Slime").max_hp(30).strength(10).build().unwrap();
        repo.save(&Character::monster(stats, default_strategy())).unwrap();

        let slime = repo.get_by_name("Slime").unwrap().unwrap();
        assert!(!slime.is_hero());
        assert_eq!(slime.ai().unwrap().name(), "basic_attack");
    }

    #[test]
    fn test_corrupt_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heroes.json");
        fs::write(&path, "{ not json").unwrap();

        let repo = JsonFileRepository::new(&path);
        assert!(matches!(repo.get_all(), Err(RepositoryError::Json(_))));
    }

    #[test]
    fn test_roster_degrades_on_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heroes.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let mut roster = Roster::new(JsonFileRepository::new(&path));
        assert!(roster.find("Aria").is_none());
        assert!(roster.all().is_empty());
        assert!(!roster.save(&hero("Aria")));

        let mut roster = Roster::new(InMemoryRepository::new());
        assert!(roster.save(&hero("Aria")));
        assert_eq!(roster.find("Aria").unwrap().name(), "Aria");
    }

    #[test]
    fn test_roster_exposes_backing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heroes.json");
        let mut roster = Roster::new(JsonFileRepository::new(&path));

        assert_eq!(roster.repository().path(), path.as_path());
        assert!(roster.save(&hero("Aria")));
        assert!(roster.repository().path().exists());
        assert_eq!(roster.all().len(), 1);
    }
}
