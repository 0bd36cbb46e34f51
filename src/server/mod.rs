//! Server module for building the HTTP server
//!
//! This module provides a `ServerBuilder` that assembles the host and registers:
//! - GraphQL routes (endpoint, SDL export, GraphiQL console)
//! - Health check routes

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use exposure::{GraphQLExposure, RestExposure};
pub use host::ServerHost;
