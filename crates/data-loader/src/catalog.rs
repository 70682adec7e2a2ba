//! Movie catalog and actor index.
//!
//! Both are immutable lookup tables built once from the metadata feed and
//! passed by reference to whatever presents results; the core pipeline
//! never reads them.

use crate::types::{ActorId, Movie, MovieId, MovieRecord, UserId};
use std::collections::{HashMap, HashSet};

/// Bijection between actor identifiers and dense indices, plus a display
/// name per actor.
///
/// Indices are assigned in first-seen order across the metadata feed and
/// never reassigned. Names are overwritten whenever a later record spells
/// one differently; last write wins.
#[derive(Debug, Default)]
pub struct ActorIndex {
    ids: Vec<ActorId>,
    id_to_index: HashMap<ActorId, usize>,
    id_to_name: HashMap<ActorId, String>,
}

impl ActorIndex {
    fn insert(&mut self, id: &ActorId, name: &str) {
        self.id_to_name.insert(id.clone(), name.to_string());

        if !self.id_to_index.contains_key(id) {
            self.id_to_index.insert(id.clone(), self.ids.len());
            self.ids.push(id.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.id_to_index.get(id).copied()
    }

    pub fn id_at(&self, index: usize) -> Option<&ActorId> {
        self.ids.get(index)
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.id_to_name.get(id).map(|s| s.as_str())
    }
}

/// Lookup table from movie identifier to display metadata, restricted to
/// movies the rating stream actually references.
#[derive(Debug, Default)]
pub struct MovieCatalog {
    movies: HashMap<MovieId, Movie>,
    actors: ActorIndex,
}

impl MovieCatalog {
    /// Build the catalog from raw metadata records.
    ///
    /// Records for movies outside `known_movies` are dropped. The actor
    /// index only covers actors of retained movies.
    pub fn from_records<I>(records: I, known_movies: &HashSet<MovieId>) -> Self
    where
        I: IntoIterator<Item = MovieRecord>,
    {
        let mut catalog = MovieCatalog::default();

        for record in records {
            if !known_movies.contains(&record.movie_id) {
                continue;
            }

            for (actor_id, actor_name) in record.actor_ids.iter().zip(&record.actor_names) {
                catalog.actors.insert(actor_id, actor_name);
            }

            let movie = Movie {
                id: record.movie_id.clone(),
                title: record.title,
                cast: record.actor_ids.into_iter().collect(),
                genre: record.genre,
            };
            catalog.movies.insert(movie.id.clone(), movie);
        }

        catalog
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn movie(&self, id: &str) -> Option<&Movie> {
        self.movies.get(id)
    }

    pub fn title_of(&self, id: &str) -> Option<&str> {
        self.movies.get(id).map(|m| m.title.as_str())
    }

    pub fn actors(&self) -> &ActorIndex {
        &self.actors
    }
}

/// A loaded dataset: the rating matrix plus the presentation catalog.
#[derive(Debug)]
pub struct Dataset {
    pub matrix: crate::matrix::RatingMatrix,
    pub catalog: MovieCatalog,
}

impl Dataset {
    /// User identifiers in row order (convenience for target selection)
    pub fn users(&self) -> &[UserId] {
        self.matrix.users()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str, cast: &[(&str, &str)], genre: &str) -> MovieRecord {
        MovieRecord {
            movie_id: id.to_string(),
            title: title.to_string(),
            actor_ids: cast.iter().map(|(id, _)| id.to_string()).collect(),
            actor_names: cast.iter().map(|(_, name)| name.to_string()).collect(),
            genre: genre.to_string(),
        }
    }

    fn known(ids: &[&str]) -> HashSet<MovieId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_restricts_to_known_movies() {
        let records = vec![
            record("tt001", "Kept", &[("nm1", "Ann")], "Drama"),
            record("tt999", "Dropped", &[("nm2", "Bob")], "Comedy"),
        ];

        let catalog = MovieCatalog::from_records(records, &known(&["tt001"]));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.title_of("tt001"), Some("Kept"));
        assert!(catalog.movie("tt999").is_none());
        // Actors of dropped movies are not indexed
        assert!(catalog.actors().index_of("nm2").is_none());
    }

    #[test]
    fn test_actor_index_bijection() {
        let records = vec![
            record("tt001", "First", &[("nm1", "Ann"), ("nm2", "Bob")], "Drama"),
            record("tt002", "Second", &[("nm2", "Bob"), ("nm3", "Cy")], "Drama"),
        ];

        let catalog = MovieCatalog::from_records(records, &known(&["tt001", "tt002"]));
        let actors = catalog.actors();

        assert_eq!(actors.len(), 3);
        // First-seen order, contiguous from 0
        assert_eq!(actors.index_of("nm1"), Some(0));
        assert_eq!(actors.index_of("nm2"), Some(1));
        assert_eq!(actors.index_of("nm3"), Some(2));
        for i in 0..actors.len() {
            let id = actors.id_at(i).unwrap();
            assert_eq!(actors.index_of(id), Some(i));
        }
    }

    #[test]
    fn test_actor_name_last_write_wins_but_index_is_stable() {
        let records = vec![
            record("tt001", "First", &[("nm1", "A. Name")], "Drama"),
            record("tt002", "Second", &[("nm1", "Ann Name")], "Drama"),
        ];

        let catalog = MovieCatalog::from_records(records, &known(&["tt001", "tt002"]));
        let actors = catalog.actors();

        assert_eq!(actors.index_of("nm1"), Some(0));
        assert_eq!(actors.name_of("nm1"), Some("Ann Name"));
    }

    #[test]
    fn test_movie_cast_is_a_set() {
        let records = vec![record(
            "tt001",
            "First",
            &[("nm1", "Ann"), ("nm1", "Ann")],
            "Drama",
        )];

        let catalog = MovieCatalog::from_records(records, &known(&["tt001"]));
        assert_eq!(catalog.movie("tt001").unwrap().cast.len(), 1);
    }
}
