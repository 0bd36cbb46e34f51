//! Service traits for catalogue lookups and user sessions

use crate::core::entity::{Actor, Director, Movie, RecordId};
use crate::core::error::{AuthError, CatalogError};
use async_trait::async_trait;

/// Read-only access to the movie catalogue
///
/// Lookups on unknown ids return `None` or an empty list, never an error.
/// Implementations are agnostic to how the records are stored.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List all movies in catalogue order
    async fn movies(&self) -> Vec<Movie>;

    /// Get an actor by ID
    async fn actor(&self, id: RecordId) -> Option<Actor>;

    /// Get a director by ID
    async fn director(&self, id: RecordId) -> Option<Director>;

    /// Movies whose cast contains the actor, in catalogue order
    async fn movies_with_actor(&self, actor_id: RecordId) -> Vec<Movie>;

    /// Movies directed by the director, in catalogue order
    async fn movies_by_director(&self, director_id: RecordId) -> Vec<Movie>;

    /// Directors the actor has worked with
    ///
    /// Deduplicated by director id, in the order they are first met while
    /// scanning the actor's movies.
    async fn directors_of_actor(&self, actor_id: RecordId) -> Vec<Director>;

    /// The director of a movie (None if the reference dangles)
    async fn director_of_movie(&self, movie: &Movie) -> Option<Director> {
        self.director(movie.director_id).await
    }

    /// The cast of a movie, in `actor_ids` order
    ///
    /// Dangling actor ids are skipped.
    async fn actors_of_movie(&self, movie: &Movie) -> Vec<Actor> {
        let mut actors = Vec::with_capacity(movie.actor_ids.len());
        for id in &movie.actor_ids {
            if let Some(actor) = self.actor(*id).await {
                actors.push(actor);
            }
        }
        actors
    }

    /// Check that ids are unique and every movie reference resolves
    fn validate(&self) -> Result<(), CatalogError>;
}

/// A registered user as exposed to clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
}

/// The outcome of a successful account creation or login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer token
    pub token: String,
    pub user: User,
}

/// Username/password accounts mapped to opaque tokens
///
/// Passwords are compared in plaintext and tokens never expire. Both
/// operations return a typed error instead of failing the request.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Register a new user and issue its token
    async fn create_user(&self, username: &str, password: &str) -> Result<Session, AuthError>;

    /// Check credentials and return the token issued at creation
    async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError>;

    /// Resolve a token to the id of the user owning it
    async fn resolve_token(&self, token: &str) -> Option<i32>;

    /// Number of registered users
    async fn user_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Catalogue exercising only the required methods so the provided ones
    /// are tested on their own.
    struct TinyCatalog {
        actors: Vec<Actor>,
        directors: Vec<Director>,
    }

    #[async_trait]
    impl CatalogService for TinyCatalog {
        async fn movies(&self) -> Vec<Movie> {
            vec![]
        }
        async fn actor(&self, id: RecordId) -> Option<Actor> {
            self.actors.iter().find(|a| a.id == id).cloned()
        }
        async fn director(&self, id: RecordId) -> Option<Director> {
            self.directors.iter().find(|d| d.id == id).cloned()
        }
        async fn movies_with_actor(&self, _actor_id: RecordId) -> Vec<Movie> {
            vec![]
        }
        async fn movies_by_director(&self, _director_id: RecordId) -> Vec<Movie> {
            vec![]
        }
        async fn directors_of_actor(&self, _actor_id: RecordId) -> Vec<Director> {
            vec![]
        }
        fn validate(&self) -> Result<(), CatalogError> {
            Ok(())
        }
    }

    fn tiny() -> TinyCatalog {
        TinyCatalog {
            actors: vec![
                Actor::new(1, "A", "2000/01/01", "US"),
                Actor::new(2, "B", "2000/01/01", "US"),
            ],
            directors: vec![Director::new(7, "D", "1950/01/01", "BR")],
        }
    }

    #[tokio::test]
    async fn test_actors_of_movie_keeps_order_and_skips_dangling() {
        let movie = Movie::new(1, "M", 2000, 3.0, 7, vec![2, 99, 1]);
        let ids: Vec<_> = tiny()
            .actors_of_movie(&movie)
            .await
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_director_of_movie() {
        let catalog = tiny();
        let movie = Movie::new(1, "M", 2000, 3.0, 7, vec![]);
        assert_eq!(catalog.director_of_movie(&movie).await.unwrap().id, 7);

        let orphan = Movie::new(2, "N", 2000, 3.0, 8, vec![]);
        assert!(catalog.director_of_movie(&orphan).await.is_none());
    }
}
