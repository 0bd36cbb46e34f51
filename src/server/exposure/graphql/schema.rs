//! GraphQL schema for the movie catalogue
//!
//! Object types wrap the catalogue records and resolve their relations
//! through the [`ServerHost`] stored in the schema data. Nothing here holds
//! state of its own.

use crate::core::entity::{Actor, Director, Movie};
use crate::core::error::AuthError;
use crate::core::service::Session;
use crate::server::host::ServerHost;
use async_graphql::{
    Context, EmptySubscription, Error, ErrorExtensions, Object, Result, Schema, SimpleObject,
};
use std::sync::Arc;

/// The executable schema type
pub type ScoutSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Bearer token taken from the `Authorization` header of the HTTP request
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Build the schema with the host attached as context data
pub fn build_schema(host: Arc<ServerHost>) -> ScoutSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(host)
        .finish()
}

fn host<'a>(ctx: &Context<'a>) -> Result<&'a Arc<ServerHost>> {
    ctx.data::<Arc<ServerHost>>()
}

impl ErrorExtensions for AuthError {
    fn extend(&self) -> Error {
        Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.error_code()))
    }
}

// =============================================================================
// Catalogue types
// =============================================================================

pub struct ActorNode(Actor);

#[Object(name = "Actor")]
impl ActorNode {
    async fn id(&self) -> i32 {
        self.0.id
    }

    async fn name(&self) -> Option<&str> {
        Some(&self.0.name)
    }

    async fn birthday(&self) -> Option<&str> {
        Some(&self.0.birthday)
    }

    async fn country(&self) -> Option<&str> {
        Some(&self.0.country)
    }

    /// Movies this actor plays in
    async fn movies(&self, ctx: &Context<'_>) -> Result<Vec<MovieNode>> {
        let movies = host(ctx)?.catalog.movies_with_actor(self.0.id).await;
        Ok(movies.into_iter().map(MovieNode::unrated).collect())
    }

    /// Directors of this actor's movies, without duplicates
    async fn directors(&self, ctx: &Context<'_>) -> Result<Vec<DirectorNode>> {
        let directors = host(ctx)?.catalog.directors_of_actor(self.0.id).await;
        Ok(directors.into_iter().map(DirectorNode).collect())
    }
}

pub struct DirectorNode(Director);

#[Object(name = "Director")]
impl DirectorNode {
    async fn id(&self) -> i32 {
        self.0.id
    }

    async fn name(&self) -> Option<&str> {
        Some(&self.0.name)
    }

    async fn birthday(&self) -> Option<&str> {
        Some(&self.0.birthday)
    }

    async fn country(&self) -> Option<&str> {
        Some(&self.0.country)
    }

    /// Movies directed by this director
    async fn movies(&self, ctx: &Context<'_>) -> Result<Vec<MovieNode>> {
        let movies = host(ctx)?.catalog.movies_by_director(self.0.id).await;
        Ok(movies.into_iter().map(MovieNode::unrated).collect())
    }
}

pub struct MovieNode {
    movie: Movie,
    scoutbase_rating: Option<f64>,
}

impl MovieNode {
    fn unrated(movie: Movie) -> Self {
        Self {
            movie,
            scoutbase_rating: None,
        }
    }
}

#[Object(name = "Movie")]
impl MovieNode {
    async fn id(&self) -> i32 {
        self.movie.id
    }

    async fn title(&self) -> Option<&str> {
        Some(&self.movie.title)
    }

    async fn year(&self) -> Option<i32> {
        Some(self.movie.year)
    }

    async fn rating(&self) -> Option<f64> {
        Some(self.movie.rating)
    }

    async fn director(&self, ctx: &Context<'_>) -> Result<Option<DirectorNode>> {
        let director = host(ctx)?.catalog.director_of_movie(&self.movie).await;
        Ok(director.map(DirectorNode))
    }

    /// Cast in billing order
    async fn actors(&self, ctx: &Context<'_>) -> Result<Vec<ActorNode>> {
        let actors = host(ctx)?.catalog.actors_of_movie(&self.movie).await;
        Ok(actors.into_iter().map(ActorNode).collect())
    }

    /// Only present when the movie list was requested with a valid token
    #[graphql(name = "scoutbase_rating")]
    async fn scoutbase_rating(&self) -> Option<f64> {
        self.scoutbase_rating
    }
}

// =============================================================================
// Account types
// =============================================================================

#[derive(SimpleObject)]
#[graphql(name = "User")]
pub struct UserNode {
    pub id: i32,
    pub name: Option<String>,
}

#[derive(SimpleObject)]
pub struct AuthResponse {
    pub token: String,
    pub user: Option<UserNode>,
}

impl From<Session> for AuthResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            user: Some(UserNode {
                id: session.user.id,
                name: Some(session.user.name),
            }),
        }
    }
}

// =============================================================================
// Roots
// =============================================================================

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All movies; each carries a fresh `scoutbase_rating` when `token` is valid
    ///
    /// Without a `token` argument the request's bearer token is used.
    async fn movies(&self, ctx: &Context<'_>, token: Option<String>) -> Result<Vec<MovieNode>> {
        let host = host(ctx)?;
        let token = token.or_else(|| ctx.data_opt::<BearerToken>().map(|b| b.0.clone()));
        let signed_in = host.is_signed_in(token.as_deref()).await;

        let movies = host.catalog.movies().await;
        Ok(movies
            .into_iter()
            .map(|movie| MovieNode {
                movie,
                scoutbase_rating: signed_in.then(|| host.rating.rate()),
            })
            .collect())
    }

    async fn actor(&self, ctx: &Context<'_>, id: i32) -> Result<Option<ActorNode>> {
        Ok(host(ctx)?.catalog.actor(id).await.map(ActorNode))
    }

    async fn director(&self, ctx: &Context<'_>, id: i32) -> Result<Option<DirectorNode>> {
        Ok(host(ctx)?.catalog.director(id).await.map(DirectorNode))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Register a user and return its token
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> Result<Option<AuthResponse>> {
        match host(ctx)?.sessions.create_user(&username, &password).await {
            Ok(session) => {
                tracing::info!(user_id = session.user.id, "user created");
                Ok(Some(session.into()))
            }
            Err(e) => {
                tracing::debug!(error = %e, "createUser rejected");
                Err(e.extend())
            }
        }
    }

    /// Exchange credentials for the token issued at registration
    async fn login(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> Result<Option<AuthResponse>> {
        match host(ctx)?.sessions.login(&username, &password).await {
            Ok(session) => Ok(Some(session.into())),
            Err(e) => {
                tracing::debug!(error = %e, "login rejected");
                Err(e.extend())
            }
        }
    }
}
