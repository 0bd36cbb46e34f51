//! GraphQL API exposure
//!
//! Serves the typed catalogue schema over HTTP:
//! - `POST /graphql` (and `GET` with query parameters) executes operations
//! - `GET /graphql/schema` returns the SDL
//! - `GET /graphiql` serves the GraphiQL console when enabled in config

mod schema;

pub use schema::{
    ActorNode, AuthResponse, BearerToken, DirectorNode, MovieNode, MutationRoot, QueryRoot,
    ScoutSchema, UserNode, build_schema,
};

use crate::server::host::ServerHost;
use anyhow::Result;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::Extension,
    http::{HeaderMap, header},
    response::{Html, IntoResponse},
    routing::get,
};
use std::sync::Arc;

/// GraphQL API exposure implementation
pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the GraphQL router from a host
    ///
    /// The schema is built once here and shared by every request.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let host = Arc::new(builder.build_host()?);
    /// let graphql_app = GraphQLExposure::build_router(host)?;
    /// ```
    pub fn build_router(host: Arc<ServerHost>) -> Result<Router> {
        let graphiql = host.config.graphiql;
        let schema = build_schema(host);

        let mut router = Router::new()
            .route("/graphql", get(graphql_handler).post(graphql_handler))
            .route("/graphql/schema", get(graphql_sdl));

        if graphiql {
            router = router.route("/graphiql", get(graphiql_console));
        }

        Ok(router.layer(Extension(schema)))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}

/// Handler for GraphQL queries and mutations
async fn graphql_handler(
    Extension(schema): Extension<ScoutSchema>,
    headers: HeaderMap,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = request.into_inner();
    tracing::debug!(operation = ?request.operation_name, "executing GraphQL request");

    if let Some(token) = bearer_token(&headers) {
        request = request.data(BearerToken(token));
    }

    schema.execute(request).await.into()
}

/// Handler for the GraphiQL console
async fn graphiql_console() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// Handler for GraphQL schema SDL export
async fn graphql_sdl(Extension(schema): Extension<ScoutSchema>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        schema.sdl(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(
            bearer_token(&headers_with("Bearer abc123")),
            Some("abc123".to_string())
        );
        assert_eq!(
            bearer_token(&headers_with("bearer abc123")),
            Some("abc123".to_string())
        );
        assert_eq!(bearer_token(&headers_with("Basic dXNlcg==")), None);
        assert_eq!(bearer_token(&headers_with("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
