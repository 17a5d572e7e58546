//! Application layer for story-council
//!
//! This crate contains the registries, port definitions, application
//! configuration and the discussion orchestrator. It depends only on the
//! domain layer.

pub mod config;
pub mod ports;
pub mod registry;
pub mod use_cases;

// Re-export commonly used types
pub use config::DiscussionParams;
pub use ports::{
    generation_gateway::{GatewayError, GenerationGateway, GenerationOptions},
    memory_store::{MemoryStore, StoreError},
    progress::{DiscussionProgress, NoProgress},
};
pub use registry::{RegistryError, RoleRegistry, SessionRegistry};
pub use use_cases::run_discussion::{DiscussionError, DiscussionOrchestrator};
