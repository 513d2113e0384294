//! Skill configuration loading

use super::ConfigError;
use crate::skill::Skill;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Container for skill configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    #[serde(rename = "skills")]
    pub skills: Vec<Skill>,
}

fn into_map(config: SkillsConfig) -> HashMap<String, Skill> {
    config
        .skills
        .into_iter()
        .map(|skill| (skill.id.clone(), skill))
        .collect()
}

/// Load skill configurations from a TOML file
pub fn load_skill_configs(path: &Path) -> Result<HashMap<String, Skill>, ConfigError> {
    let config: SkillsConfig = super::load_toml(path)?;
    Ok(into_map(config))
}

/// Load skill configurations from a TOML string
pub fn parse_skill_configs(content: &str) -> Result<HashMap<String, Skill>, ConfigError> {
    let config: SkillsConfig = super::parse_toml(content)?;
    Ok(into_map(config))
}

/// Get default skill configurations
pub fn default_skills() -> HashMap<String, Skill> {
    let toml = include_str!("../../config/skills.toml");
    parse_skill_configs(toml).unwrap_or_else(|_| {
        [Skill::fireball(), Skill::heal()]
            .into_iter()
            .map(|skill| (skill.id.clone(), skill))
            .collect()
    })
}
