//! Durable session memory

mod sqlite_store;

pub use sqlite_store::SqliteMemoryStore;
