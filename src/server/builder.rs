//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::{GraphQLExposure, RestExposure};
use super::host::ServerHost;
use crate::config::ServerConfig;
use crate::core::{CatalogService, RandomRating, RatingSource, SessionStore};
use crate::storage::{InMemoryCatalog, InMemorySessionStore};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for creating the HTTP server
///
/// Every service has an in-memory default, so `ServerBuilder::new().build()`
/// serves the fixture catalogue with random ratings.
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_config(ServerConfig::load()?)
///     .with_session_store(InMemorySessionStore::new())
///     .serve()
///     .await?;
/// ```
pub struct ServerBuilder {
    config: ServerConfig,
    catalog: Option<Arc<dyn CatalogService>>,
    sessions: Option<Arc<dyn SessionStore>>,
    rating: Option<Arc<dyn RatingSource>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            catalog: None,
            sessions: None,
            rating: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set the server configuration
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the catalogue (defaults to the fixture catalogue)
    pub fn with_catalog(mut self, catalog: impl CatalogService + 'static) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    /// Set the session store (defaults to an empty in-memory store)
    pub fn with_session_store(mut self, sessions: impl SessionStore + 'static) -> Self {
        self.sessions = Some(Arc::new(sessions));
        self
    }

    /// Set the rating source (defaults to [`RandomRating`])
    pub fn with_rating_source(mut self, rating: impl RatingSource + 'static) -> Self {
        self.rating = Some(Arc::new(rating));
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    ///
    /// Fails if the catalogue has dangling or duplicate references.
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let catalog = self
            .catalog
            .take()
            .unwrap_or_else(|| Arc::new(InMemoryCatalog::from_fixtures()));
        catalog.validate()?;

        let sessions = self
            .sessions
            .take()
            .unwrap_or_else(|| Arc::new(InMemorySessionStore::new()));
        let rating = self.rating.take().unwrap_or_else(|| Arc::new(RandomRating));

        Ok(ServerHost::new(
            self.config.clone(),
            catalog,
            sessions,
            rating,
        ))
    }

    /// Build the final router
    ///
    /// Merges the REST health routes, the GraphQL routes and any custom
    /// routes, wrapped in request tracing (and CORS when configured).
    pub fn build(mut self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);

        let mut app = RestExposure::build_router(host.clone())?
            .merge(GraphQLExposure::build_router(host.clone())?);

        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }

        if host.config.cors {
            app = app.layer(CorsLayer::permissive());
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the configured host and port
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.socket_addr()?;
        let graphiql = self.config.graphiql;
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);
        if graphiql {
            tracing::info!("GraphiQL console at http://{}/graphiql", addr);
        }

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{Actor, Director, Movie};
    use crate::core::error::CatalogError;
    use crate::core::FixedRating;

    #[test]
    fn test_build_with_defaults() {
        assert!(ServerBuilder::new().build().is_ok());
    }

    #[test]
    fn test_build_host_uses_injected_services() {
        let mut builder = ServerBuilder::new()
            .with_config(ServerConfig {
                port: 4000,
                ..ServerConfig::default()
            })
            .with_rating_source(FixedRating(8.0));
        let host = builder.build_host().unwrap();

        assert_eq!(host.config.port, 4000);
        assert_eq!(host.rating.rate(), 8.0);
    }

    #[test]
    fn test_build_rejects_inconsistent_catalog() {
        let catalog = InMemoryCatalog::new(
            vec![Actor::new(1, "A", "2000/01/01", "US")],
            vec![Director::new(1, "D", "1950/01/01", "BR")],
            vec![Movie::new(1, "M", 2000, 3.0, 2, vec![1])],
        );

        let err = ServerBuilder::new()
            .with_catalog(catalog)
            .build()
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<CatalogError>(),
            Some(&CatalogError::DanglingDirector {
                movie_id: 1,
                director_id: 2
            })
        );
    }

    #[test]
    fn test_build_with_cors_and_custom_routes() {
        let result = ServerBuilder::new()
            .with_config(ServerConfig {
                cors: true,
                graphiql: false,
                ..ServerConfig::default()
            })
            .with_custom_routes(Router::new())
            .build();
        assert!(result.is_ok());
    }
}
