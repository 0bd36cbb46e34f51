//! Server host for transport-agnostic API exposure
//!
//! This module provides a `ServerHost` structure that owns every service the
//! resolvers need. Exposures (GraphQL, REST) borrow it through an `Arc` and
//! never reach for process-wide state.

use crate::config::ServerConfig;
use crate::core::{CatalogService, RatingSource, SessionStore};
use std::sync::Arc;

/// Host context containing all server state
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(ServerHost::new(
///     ServerConfig::default(),
///     Arc::new(InMemoryCatalog::from_fixtures()),
///     Arc::new(InMemorySessionStore::new()),
///     Arc::new(RandomRating),
/// ));
///
/// let app = Router::new()
///     .merge(RestExposure::build_router(host.clone())?)
///     .merge(GraphQLExposure::build_router(host)?);
/// ```
pub struct ServerHost {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Read-only movie catalogue
    pub catalog: Arc<dyn CatalogService>,

    /// Users and their tokens
    pub sessions: Arc<dyn SessionStore>,

    /// Generator for `scoutbase_rating`
    pub rating: Arc<dyn RatingSource>,
}

impl ServerHost {
    pub fn new(
        config: ServerConfig,
        catalog: Arc<dyn CatalogService>,
        sessions: Arc<dyn SessionStore>,
        rating: Arc<dyn RatingSource>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
            sessions,
            rating,
        }
    }

    /// Whether a bearer token belongs to a registered user
    pub async fn is_signed_in(&self, token: Option<&str>) -> bool {
        match token {
            Some(token) => self.sessions.resolve_token(token).await.is_some(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedRating;
    use crate::storage::{InMemoryCatalog, InMemorySessionStore};

    fn make_host() -> ServerHost {
        ServerHost::new(
            ServerConfig::default(),
            Arc::new(InMemoryCatalog::from_fixtures()),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(FixedRating(6.0)),
        )
    }

    #[tokio::test]
    async fn test_is_signed_in() {
        let host = make_host();
        let session = host.sessions.create_user("ana", "secret").await.unwrap();

        assert!(host.is_signed_in(Some(&session.token)).await);
        assert!(!host.is_signed_in(Some("forged")).await);
        assert!(!host.is_signed_in(None).await);
    }

    #[test]
    fn test_config_accessible_from_host() {
        let host = make_host();
        assert_eq!(host.config.port, 3000);
        assert_eq!(host.rating.rate(), 6.0);
    }
}
