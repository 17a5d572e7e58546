//! Role entity

use serde::{Deserialize, Serialize};

/// Backend model used by the built-in roles.
pub const DEFAULT_MODEL: &str = "deepseek-r1:14b";

/// Role that writes the final draft unless configured otherwise.
pub const DEFAULT_FINAL_EDITOR: &str = "editor_in_chief";

/// A named AI persona (Entity)
///
/// Roles are keyed by `id`. A run clones the roles it resolves, so a role
/// re-registered mid-run does not affect turns already scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique key, e.g. `plot_writer`
    pub id: String,
    /// Human-readable name used inside prompts
    pub name: String,
    /// Backend model identifier passed to the generation gateway
    pub model: String,
    /// Generation preset name (resolved to sampling options by the gateway)
    pub preset: String,
    /// What this role is responsible for
    #[serde(default)]
    pub description: String,
}

impl Role {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        model: impl Into<String>,
        preset: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            model: model.into(),
            preset: preset.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The four built-in story roles.
    pub fn default_roles() -> Vec<Role> {
        vec![
            Role::new("plot_writer", "Plot Writer", DEFAULT_MODEL, "creative")
                .with_description("Drives the main storyline and its key plot turns"),
            Role::new(
                "character_designer",
                "Character Designer",
                DEFAULT_MODEL,
                "detailed",
            )
            .with_description("Shapes characters, personalities and their relationships"),
            Role::new("world_builder", "World Builder", DEFAULT_MODEL, "analytical")
                .with_description("Builds the setting, its geography and its history"),
            Role::new(
                DEFAULT_FINAL_EDITOR,
                "Editor in Chief",
                DEFAULT_MODEL,
                "critical",
            )
            .with_description("Integrates the material, polishes the prose and signs off the draft"),
        ]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
