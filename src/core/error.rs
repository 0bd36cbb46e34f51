//! Typed error handling for the scoutbase server
//!
//! Each concern owns a small error enum; [`ScoutError`] wraps them so callers
//! can match on specific cases instead of a generic `anyhow::Error`.
//!
//! # Error Categories
//!
//! - [`AuthError`]: account creation and login failures
//! - [`CatalogError`]: inconsistent catalogue data (dangling or duplicate ids)
//! - [`ConfigError`]: configuration loading and validation
//! - [`StorageError`]: in-memory store failures
//!
//! # Example
//!
//! ```rust,ignore
//! match sessions.login("ana", "wrong").await {
//!     Ok(session) => println!("token: {}", session.token),
//!     Err(AuthError::InvalidCredentials) => println!("try again"),
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::core::entity::RecordId;

/// The main error type for the server
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ScoutError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ScoutError::Auth(e) => e.status_code(),
            ScoutError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ScoutError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ScoutError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ScoutError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ScoutError::Auth(e) => e.error_code(),
            ScoutError::Catalog(_) => "CATALOG_ERROR",
            ScoutError::Config(_) => "CONFIG_ERROR",
            ScoutError::Storage(_) => "STORAGE_ERROR",
            ScoutError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

/// Lets handlers added through `ServerBuilder::with_custom_routes` return
/// `Result<_, ScoutError>`; the body is an [`ErrorResponse`].
impl IntoResponse for ScoutError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Errors raised by the session store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The username is already registered
    #[error("User already exists")]
    UserExists { username: String },

    /// Unknown username or password mismatch
    #[error("Missing user or bad password")]
    InvalidCredentials,

    /// The backing store could not be accessed
    #[error("{0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UserExists { .. } => StatusCode::CONFLICT,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::UserExists { .. } => "USER_EXISTS",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

// =============================================================================
// Catalog Errors
// =============================================================================

/// Referential problems in the catalogue data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("movie {movie_id} references unknown director {director_id}")]
    DanglingDirector {
        movie_id: RecordId,
        director_id: RecordId,
    },

    #[error("movie {movie_id} references unknown actor {actor_id}")]
    DanglingActor {
        movie_id: RecordId,
        actor_id: RecordId,
    },

    #[error("duplicate {resource} id {id}")]
    DuplicateId { resource: &'static str, id: RecordId },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the in-memory stores
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// A lock guarding shared state was poisoned by a panicking writer
    #[error("Failed to acquire {0} lock")]
    LockPoisoned(&'static str),

    /// No more identifiers can be assigned
    #[error("The {0} store is full")]
    Exhausted(&'static str),
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for scoutbase operations
pub type ScoutResult<T> = Result<T, ScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_messages() {
        let exists = AuthError::UserExists {
            username: "ana".to_string(),
        };
        assert_eq!(exists.to_string(), "User already exists");
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Missing user or bad password"
        );
    }

    #[test]
    fn test_auth_error_status_codes() {
        let exists = AuthError::UserExists {
            username: "ana".to_string(),
        };
        assert_eq!(exists.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_scout_error_conversion() {
        let err: ScoutError = AuthError::InvalidCredentials.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.error_code(), "INVALID_CREDENTIALS");
    }

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::DanglingActor {
            movie_id: 4,
            actor_id: 9,
        };
        assert_eq!(err.to_string(), "movie 4 references unknown actor 9");

        let scout: ScoutError = err.into();
        assert_eq!(scout.error_code(), "CATALOG_ERROR");
    }

    #[test]
    fn test_error_response_serialization() {
        let err = ScoutError::Storage(StorageError::LockPoisoned("session"));
        let response = serde_json::to_value(err.to_response()).unwrap();

        assert_eq!(response["code"], "STORAGE_ERROR");
        assert_eq!(response["message"], "Failed to acquire session lock");
    }

    #[test]
    fn test_from_serde_yaml_error() {
        let yaml_err = serde_yaml::from_str::<u16>("not: [a number").unwrap_err();
        let err: ScoutError = ConfigError::from(yaml_err).into();
        assert!(matches!(err, ScoutError::Config(ConfigError::Parse(_))));
    }
}
