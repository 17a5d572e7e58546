//! Generation Gateway port
//!
//! Defines the interface for the text-generation backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during a generation call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Generation timed out")]
    Timeout,

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid generation request: {0}")]
    Invalid(String),
}

impl GatewayError {
    /// Check if this error is a timeout (as opposed to a backend failure)
    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::Timeout)
    }
}

/// Per-call generation options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Preset name; the adapter resolves it to concrete sampling parameters
    pub preset: String,
}

impl GenerationOptions {
    pub fn with_preset(preset: impl Into<String>) -> Self {
        Self {
            preset: preset.into(),
        }
    }
}

/// Gateway for text generation
///
/// Treated as opaque and synchronous by the orchestrator: one prompt in, one
/// complete text out. Implementations (adapters) live in the infrastructure
/// layer; any backend honoring this contract is interchangeable.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        session_id: &str,
        model: &str,
        options: &GenerationOptions,
    ) -> Result<String, GatewayError>;
}
