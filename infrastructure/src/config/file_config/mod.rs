//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types.

mod discussion;
mod gateway;
mod roles;
mod storage;

pub use discussion::FileDiscussionConfig;
pub use gateway::FileGatewayConfig;
pub use roles::FileRoleConfig;
pub use storage::FileStorageConfig;

use council_application::DiscussionParams;
use council_domain::Role;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("gateway.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("discussion.max_rounds cannot be 0")]
    InvalidMaxRounds,

    #[error("discussion.consensus_threshold cannot be 0")]
    InvalidThreshold,

    #[error("discussion.max_context_tokens cannot be 0")]
    InvalidContextBudget,

    #[error("role id cannot be empty")]
    EmptyRoleId,

    #[error("model name cannot be empty (role {0})")]
    EmptyModelName(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Storage settings
    pub storage: FileStorageConfig,
    /// Generation backend settings
    pub gateway: FileGatewayConfig,
    /// Discussion loop settings
    pub discussion: FileDiscussionConfig,
    /// Extra or overriding role definitions
    pub roles: Vec<FileRoleConfig>,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.gateway.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.discussion.max_rounds == 0 {
            return Err(ConfigValidationError::InvalidMaxRounds);
        }
        if self.discussion.consensus_threshold == 0 {
            return Err(ConfigValidationError::InvalidThreshold);
        }
        if self.discussion.max_context_tokens == 0 {
            return Err(ConfigValidationError::InvalidContextBudget);
        }

        for role in &self.roles {
            if role.id.trim().is_empty() {
                return Err(ConfigValidationError::EmptyRoleId);
            }
            if let Some(model) = &role.model
                && model.trim().is_empty()
            {
                return Err(ConfigValidationError::EmptyModelName(role.id.clone()));
            }
        }

        Ok(())
    }

    /// Discussion parameters, with the gateway timeout as the turn timeout
    pub fn discussion_params(&self) -> DiscussionParams {
        self.discussion.to_params(self.gateway.timeout())
    }

    /// The built-in roles followed by the configured ones.
    ///
    /// Registering them in order lets a configured role replace a built-in
    /// one with the same id.
    pub fn roles(&self) -> Vec<Role> {
        Role::default_roles()
            .into_iter()
            .chain(self.roles.iter().map(FileRoleConfig::to_role))
            .collect()
    }
}
