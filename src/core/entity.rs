//! Typed catalogue records
//!
//! Every record carries an integer identity unique within its collection.
//! Relations are expressed as foreign-key style id fields on [`Movie`]:
//! `director_id` (one director per movie) and `actor_ids` (ordered cast).

use serde::{Deserialize, Serialize};

/// Identifier shared by all catalogue records
pub type RecordId = i32;

/// Base trait for all catalogue records.
pub trait Record: Clone + Send + Sync + 'static {
    /// The singular resource name (e.g., "actor", "movie")
    fn resource_name() -> &'static str;

    /// Get the unique identifier for this record
    fn id(&self) -> RecordId;
}

/// A person appearing in movies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: RecordId,
    pub name: String,
    pub birthday: String,
    pub country: String,
}

/// A person directing movies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Director {
    pub id: RecordId,
    pub name: String,
    pub birthday: String,
    pub country: String,
}

/// A movie with its director reference and ordered cast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: RecordId,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub director_id: RecordId,
    #[serde(rename = "actorsId")]
    pub actor_ids: Vec<RecordId>,
}

impl Actor {
    pub fn new(id: RecordId, name: &str, birthday: &str, country: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            birthday: birthday.to_string(),
            country: country.to_string(),
        }
    }
}

impl Director {
    pub fn new(id: RecordId, name: &str, birthday: &str, country: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            birthday: birthday.to_string(),
            country: country.to_string(),
        }
    }
}

impl Movie {
    pub fn new(
        id: RecordId,
        title: &str,
        year: i32,
        rating: f64,
        director_id: RecordId,
        actor_ids: Vec<RecordId>,
    ) -> Self {
        Self {
            id,
            title: title.to_string(),
            year,
            rating,
            director_id,
            actor_ids,
        }
    }

    /// Check whether the given actor is part of the cast
    pub fn features(&self, actor_id: RecordId) -> bool {
        self.actor_ids.contains(&actor_id)
    }
}

impl Record for Actor {
    fn resource_name() -> &'static str {
        "actor"
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

impl Record for Director {
    fn resource_name() -> &'static str {
        "director"
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

impl Record for Movie {
    fn resource_name() -> &'static str {
        "movie"
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_features_cast_member() {
        let movie = Movie::new(1, "Moneymaker", 2009, 4.5, 1, vec![1, 2, 3]);
        assert!(movie.features(2));
        assert!(!movie.features(4));
    }

    #[test]
    fn test_movie_serializes_with_foreign_key_names() {
        let movie = Movie::new(2, "Apple", 2010, 1.5, 2, vec![2, 3]);
        let value = serde_json::to_value(&movie).unwrap();

        assert_eq!(value["directorId"], 2);
        assert_eq!(value["actorsId"], serde_json::json!([2, 3]));
    }

    #[test]
    fn test_resource_names() {
        assert_eq!(Actor::resource_name(), "actor");
        assert_eq!(Director::resource_name(), "director");
        assert_eq!(Movie::resource_name(), "movie");
    }
}
