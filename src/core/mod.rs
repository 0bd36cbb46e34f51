//! Core module containing the catalogue records, service traits and errors

pub mod entity;
pub mod error;
pub mod rating;
pub mod service;

pub use entity::{Actor, Director, Movie, Record, RecordId};
pub use error::{AuthError, CatalogError, ConfigError, ScoutError, ScoutResult, StorageError};
pub use rating::{FixedRating, RandomRating, RatingSource};
pub use service::{CatalogService, Session, SessionStore, User};
