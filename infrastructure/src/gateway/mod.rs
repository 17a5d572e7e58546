//! Generation backend adapters
//!
//! [`OllamaGateway`] implements the application's `GenerationGateway` port
//! against a local Ollama server. Preset names are resolved to sampling
//! options through a [`PresetCatalog`].

mod ollama;
mod presets;

pub use ollama::{DEFAULT_BASE_URL, OllamaGateway};
pub use presets::PresetCatalog;
