//! Storage implementations for the catalogue and sessions

pub mod fixtures;
pub mod in_memory;
pub mod sessions;

pub use in_memory::InMemoryCatalog;
pub use sessions::InMemorySessionStore;
