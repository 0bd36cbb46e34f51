//! In-memory implementation of CatalogService

use crate::core::entity::{Actor, Director, Movie, Record, RecordId};
use crate::core::error::CatalogError;
use crate::core::service::CatalogService;
use crate::storage::fixtures;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

/// An ordered collection with an id index
///
/// The index points at the first record carrying each id, so lookups behave
/// like a linear "find first" scan.
#[derive(Debug, Clone)]
struct Indexed<T> {
    items: Vec<T>,
    index: HashMap<RecordId, usize>,
}

impl<T: Record> Indexed<T> {
    fn new(items: Vec<T>) -> Self {
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            index.entry(item.id()).or_insert(pos);
        }
        Self { items, index }
    }

    fn get(&self, id: RecordId) -> Option<&T> {
        self.index.get(&id).map(|pos| &self.items[*pos])
    }

    fn contains(&self, id: RecordId) -> bool {
        self.index.contains_key(&id)
    }

    fn check_unique(&self) -> Result<(), CatalogError> {
        if self.index.len() == self.items.len() {
            return Ok(());
        }
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(item.id()) {
                return Err(CatalogError::DuplicateId {
                    resource: T::resource_name(),
                    id: item.id(),
                });
            }
        }
        Ok(())
    }
}

/// Immutable in-memory catalogue
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    actors: Indexed<Actor>,
    directors: Indexed<Director>,
    movies: Indexed<Movie>,
}

impl InMemoryCatalog {
    /// Create a catalogue from explicit collections
    pub fn new(actors: Vec<Actor>, directors: Vec<Director>, movies: Vec<Movie>) -> Self {
        Self {
            actors: Indexed::new(actors),
            directors: Indexed::new(directors),
            movies: Indexed::new(movies),
        }
    }

    /// Create the catalogue shipped with the server
    pub fn from_fixtures() -> Self {
        Self::new(fixtures::actors(), fixtures::directors(), fixtures::movies())
    }

    fn movies_where(&self, predicate: impl Fn(&Movie) -> bool) -> Vec<Movie> {
        self.movies
            .items
            .iter()
            .filter(|movie| predicate(movie))
            .cloned()
            .collect()
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::from_fixtures()
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn movies(&self) -> Vec<Movie> {
        self.movies.items.clone()
    }

    async fn actor(&self, id: RecordId) -> Option<Actor> {
        self.actors.get(id).cloned()
    }

    async fn director(&self, id: RecordId) -> Option<Director> {
        self.directors.get(id).cloned()
    }

    async fn movies_with_actor(&self, actor_id: RecordId) -> Vec<Movie> {
        self.movies_where(|movie| movie.features(actor_id))
    }

    async fn movies_by_director(&self, director_id: RecordId) -> Vec<Movie> {
        self.movies_where(|movie| movie.director_id == director_id)
    }

    async fn directors_of_actor(&self, actor_id: RecordId) -> Vec<Director> {
        let mut seen = HashSet::new();
        self.movies
            .items
            .iter()
            .filter(|movie| movie.features(actor_id))
            .filter_map(|movie| self.directors.get(movie.director_id))
            .filter(|director| seen.insert(director.id))
            .cloned()
            .collect()
    }

    fn validate(&self) -> Result<(), CatalogError> {
        self.actors.check_unique()?;
        self.directors.check_unique()?;
        self.movies.check_unique()?;

        for movie in &self.movies.items {
            if !self.directors.contains(movie.director_id) {
                return Err(CatalogError::DanglingDirector {
                    movie_id: movie.id,
                    director_id: movie.director_id,
                });
            }
            if let Some(actor_id) = movie
                .actor_ids
                .iter()
                .find(|id| !self.actors.contains(**id))
            {
                return Err(CatalogError::DanglingActor {
                    movie_id: movie.id,
                    actor_id: *actor_id,
                });
            }
        }

        Ok(())
    }
}
