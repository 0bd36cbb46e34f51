//! REST API exposure
//!
//! The catalogue itself is only served over GraphQL; REST carries the
//! operational endpoints.

use super::super::host::ServerHost;
use anyhow::Result;
use axum::{Json, Router, extract::Extension, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// # Returns
    ///
    /// Returns an Axum router with the health check routes.
    pub fn build_router(host: Arc<ServerHost>) -> Result<Router> {
        Ok(Self::health_routes().layer(Extension(host)))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check(Extension(host): Extension<Arc<ServerHost>>) -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "scoutbase",
            "users": host.sessions.user_count().await
        }))
    }
}
