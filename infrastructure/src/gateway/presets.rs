//! Generation presets stored as `<presets_dir>/<name>.json`

use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Resolves preset names to JSON option objects
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    dir: PathBuf,
}

impl PresetCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Options used when a preset file does not exist
    pub fn default_options() -> Value {
        json!({ "temperature": 0.7, "max_tokens": 2000 })
    }

    /// Load the options for `name`.
    ///
    /// A missing file yields [`default_options`](Self::default_options). A
    /// file that is unreadable or not a JSON object yields `{}`.
    pub async fn resolve(&self, name: &str) -> Value {
        if name.is_empty() {
            return Self::default_options();
        }
        if !is_plain_name(name) {
            warn!("Ignoring preset with invalid name '{}'", name);
            return Self::default_options();
        }

        let path = self.dir.join(format!("{}.json", name));
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Preset '{}' not found, using defaults", name);
                return Self::default_options();
            }
            Err(e) => {
                warn!("Failed to read preset {}: {}", path.display(), e);
                return json!({});
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(options @ Value::Object(_)) => options,
            Ok(_) => {
                warn!("Preset {} is not a JSON object, ignoring it", path.display());
                json!({})
            }
            Err(e) => {
                warn!("Malformed preset {}: {}", path.display(), e);
                json!({})
            }
        }
    }
}

/// A preset name must stay inside the presets directory
fn is_plain_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_preset_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let catalog = PresetCatalog::new(dir.path());

        let options = catalog.resolve("creative").await;
        assert_eq!(options, PresetCatalog::default_options());
        assert_eq!(options["temperature"], 0.7);
        assert_eq!(options["max_tokens"], 2000);
    }

    #[tokio::test]
    async fn test_preset_file_is_loaded() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("creative.json"),
            r#"{"temperature": 1.1, "top_p": 0.9}"#,
        )
        .unwrap();
        let catalog = PresetCatalog::new(dir.path());

        let options = catalog.resolve("creative").await;
        assert_eq!(options["temperature"], 1.1);
        assert_eq!(options["top_p"], 0.9);
    }

    #[tokio::test]
    async fn test_malformed_preset_yields_empty_options() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ temperature: ").unwrap();
        std::fs::write(dir.path().join("list.json"), "[1, 2]").unwrap();
        let catalog = PresetCatalog::new(dir.path());

        assert_eq!(catalog.resolve("broken").await, json!({}));
        assert_eq!(catalog.resolve("list").await, json!({}));
    }

    #[tokio::test]
    async fn test_path_like_names_are_not_read() {
        let dir = TempDir::new().unwrap();
        let catalog = PresetCatalog::new(dir.path().join("presets"));
        std::fs::write(dir.path().join("secret.json"), r#"{"leak": true}"#).unwrap();

        let options = catalog.resolve("../secret").await;
        assert_eq!(options, PresetCatalog::default_options());
    }
}
