//! # Scoutbase
//!
//! A GraphQL API over a small in-memory movie catalogue.
//!
//! ## Features
//!
//! - **Typed catalogue**: actors, directors and movies linked by id
//! - **Relation resolvers**: navigate movie ↔ actor ↔ director in any direction
//! - **Toy accounts**: `createUser`/`login` mutations issuing opaque tokens
//! - **Scout ratings**: signed-in clients get a fresh `scoutbase_rating` per movie
//! - **Injected services**: catalogue, session store and rating source are traits
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scoutbase::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_config(ServerConfig::load()?)
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Actor, AuthError, CatalogError, CatalogService, ConfigError, Director, FixedRating, Movie,
        RandomRating, RatingSource, Record, RecordId, ScoutError, ScoutResult, Session,
        SessionStore, StorageError, User,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryCatalog, InMemorySessionStore};

    // === Config ===
    pub use crate::config::ServerConfig;

    // === Server ===
    pub use crate::server::{GraphQLExposure, RestExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
