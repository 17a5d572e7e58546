//! Generation backend configuration from TOML (`[gateway]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Raw gateway configuration from TOML
///
/// # Example
///
/// ```toml
/// [gateway]
/// base_url = "http://localhost:11434"
/// timeout_seconds = 30
/// presets_dir = "presets"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    pub base_url: String,
    /// Upper bound on one generation call
    pub timeout_seconds: u64,
    /// Directory holding `<preset>.json` option files
    pub presets_dir: PathBuf,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: crate::gateway::DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
            presets_dir: PathBuf::from("presets"),
        }
    }
}

impl FileGatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
