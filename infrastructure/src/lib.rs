//! Infrastructure layer for story-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod config;
pub mod gateway;
pub mod memory;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDiscussionConfig, FileGatewayConfig,
    FileRoleConfig, FileStorageConfig,
};
pub use gateway::{OllamaGateway, PresetCatalog};
pub use memory::SqliteMemoryStore;
