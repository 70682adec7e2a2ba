//! Core domain types shared across the workspace.
//!
//! Identifiers are opaque strings taken verbatim from the input feeds
//! (IMDb-style title ids, arbitrary user ids). Type aliases keep them from
//! being mixed up.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unique identifier for a user
pub type UserId = String;

/// Unique identifier for a movie title
pub type MovieId = String;

/// Unique identifier for an actor
pub type ActorId = String;

/// A single (user, movie, rating) triple from the rating stream.
///
/// Field names match the newline-delimited JSON of the rating feed.
/// Ratings are strictly positive; 0 is reserved as the "unrated" sentinel
/// in the matrix built from these records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRecord {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "title_id")]
    pub movie_id: MovieId,
    pub rating: f32,
}

/// A raw movie metadata record as it appears in the metadata feed.
///
/// `actor_ids` and `actor_names` are parallel lists; zipping them yields
/// the cast of the movie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "title_id")]
    pub movie_id: MovieId,
    #[serde(rename = "title_name")]
    pub title: String,
    pub actor_ids: Vec<ActorId>,
    pub actor_names: Vec<String>,
    #[serde(rename = "title_genre")]
    pub genre: String,
}

/// Display metadata for one movie, as held by the catalog.
#[derive(Debug, Clone)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// The set of actors appearing in this movie
    pub cast: HashSet<ActorId>,
    pub genre: String,
}
