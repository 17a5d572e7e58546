//! Role definitions from TOML (`[[roles]]` array)

use council_domain::{DEFAULT_MODEL, Role};
use serde::{Deserialize, Serialize};

/// One `[[roles]]` entry
///
/// ```toml
/// [[roles]]
/// id = "poet"
/// name = "Poet"
/// model = "llama3:8b"
/// preset = "creative"
/// description = "Writes verse interludes"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRoleConfig {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl FileRoleConfig {
    /// Build the role; `name` falls back to the id, `model` to the default model
    /// and `preset` to `creative`.
    pub fn to_role(&self) -> Role {
        Role::new(
            &self.id,
            self.name.clone().unwrap_or_else(|| self.id.clone()),
            self.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            self.preset.clone().unwrap_or_else(|| "creative".to_string()),
        )
        .with_description(&self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_role_fills_defaults() {
        let config = FileRoleConfig {
            id: "poet".to_string(),
            name: None,
            model: None,
            preset: None,
            description: String::new(),
        };
        let role = config.to_role();
        assert_eq!(role.name, "poet");
        assert_eq!(role.model, DEFAULT_MODEL);
        assert_eq!(role.preset, "creative");
    }
}
