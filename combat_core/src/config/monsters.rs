//! Monster template configuration loading

use super::ConfigError;
use crate::monster::MonsterTemplate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for monster templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonstersConfig {
    #[serde(rename = "monsters")]
    pub monsters: Vec<MonsterTemplate>,
}

fn validate(config: MonstersConfig) -> Result<Vec<MonsterTemplate>, ConfigError> {
    if config.monsters.is_empty() {
        return Err(ConfigError::ValidationError(
            "at least one monster template is required".to_string(),
        ));
    }
    if let Some(template) = config.monsters.iter().find(|t| t.weight == 0) {
        return Err(ConfigError::ValidationError(format!(
            "monster template '{}' has zero weight",
            template.name
        )));
    }
    Ok(config.monsters)
}

/// Load monster templates from a TOML file
pub fn load_monster_templates(path: &Path) -> Result<Vec<MonsterTemplate>, ConfigError> {
    validate(super::load_toml(path)?)
}

/// Load monster templates from a TOML string
pub fn parse_monster_templates(content: &str) -> Result<Vec<MonsterTemplate>, ConfigError> {
    validate(super::parse_toml(content)?)
}

/// Get the default template table, in selection order
pub fn default_monster_templates() -> Vec<MonsterTemplate> {
    let toml = include_str!("../../config/monsters.toml");
    parse_monster_templates(toml).unwrap_or_else(|_| {
        vec![
            MonsterTemplate::new("Slime", 40, 30, 10, 0, 2),
            MonsterTemplate::new("Goblin", 35, 50, 15, 2, 5),
            MonsterTemplate::new("Skeleton", 15, 40, 18, 1, 6),
            MonsterTemplate::new("Orc", 10, 80, 16, 4, 1),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let templates = default_monster_templates();
        let names: Vec<_> = templates.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Slime", "Goblin", "Skeleton", "Orc"]);
        assert_eq!(templates.iter().map(|t| t.weight).sum::<u32>(), 100);
        assert_eq!(templates[3], MonsterTemplate::new("Orc", 10, 80, 16, 4, 1));
    }

    #[test]
    fn test_rejects_zero_weight() {
        let toml = r#"
[[monsters]]
name = "Ghost"
weight = 0
base_hp = 10
base_strength = 1
"#;
        let result = parse_monster_templates(toml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_rejects_empty_table() {
        let result = parse_monster_templates("monsters = []");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
