//! Within-cluster recommendation ranking.
//!
//! "Users grouped with you rated these movies highly, and you haven't
//! seen them yet."
//!
//! ## Algorithm
//! 1. Look up the target user's row and cluster label
//! 2. Collect peers: rows with the same label, minus the target
//! 3. Collect the target's seen columns (rating > 0)
//! 4. Sum peers' positive ratings per unseen column
//! 5. Rank columns by descending total; the sort is stable, so equal
//!    totals keep first-seen column order

use crate::error::{EngineError, Result};
use clustering::ClusterAssignment;
use data_loader::{MovieId, RatingMatrix, UserId};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Ranks unseen movies for a target user from their cluster peers'
/// ratings. Borrows the matrix and assignment for the duration of one
/// run; nothing is copied or cached.
pub struct RecommendationEngine<'a> {
    matrix: &'a RatingMatrix,
    clusters: &'a ClusterAssignment,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(matrix: &'a RatingMatrix, clusters: &'a ClusterAssignment) -> Self {
        Self { matrix, clusters }
    }

    /// Movies the target user has rated, in column order.
    pub fn seen_movies(&self, target: &UserId) -> Result<Vec<MovieId>> {
        let row = self.target_row(target)?;
        Ok(self
            .matrix
            .seen_cols(row)
            .into_iter()
            .map(|col| self.matrix.movie_at(col).clone())
            .collect())
    }

    /// Full recommendation ranking for the target user.
    ///
    /// Only movies with positive peer rating mass appear; a user whose
    /// cluster holds no one else, or who has rated every known movie,
    /// gets an empty ranking.
    #[instrument(skip(self), fields(user = %target))]
    pub fn recommend(&self, target: &UserId) -> Result<Vec<MovieId>> {
        let row = self.target_row(target)?;
        let label = self
            .clusters
            .label_of_row(row)
            .ok_or_else(|| EngineError::UserNotFound(target.clone()))?;

        let peers: Vec<usize> = self
            .clusters
            .rows_in(label)
            .filter(|&peer| peer != row)
            .collect();
        let seen: HashSet<usize> = self.matrix.row_entries(row).map(|(col, _)| col).collect();

        debug!(
            cluster = label,
            peers = peers.len(),
            seen = seen.len(),
            "ranking unseen movies"
        );

        // Total peer rating mass per unseen column
        let mut totals: HashMap<usize, f32> = HashMap::new();
        for &peer in &peers {
            for (col, rating) in self.matrix.row_entries(peer) {
                if rating > 0.0 && !seen.contains(&col) {
                    *totals.entry(col).or_insert(0.0) += rating;
                }
            }
        }

        // Collect in column order, then stable-sort by descending total so
        // ties resolve to first-seen column order
        let mut ranked: Vec<(usize, f32)> = (0..self.matrix.n_movies())
            .filter_map(|col| totals.get(&col).map(|&total| (col, total)))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(ranked
            .into_iter()
            .map(|(col, _)| self.matrix.movie_at(col).clone())
            .collect())
    }

    fn target_row(&self, target: &UserId) -> Result<usize> {
        self.matrix
            .user_row(target)
            .ok_or_else(|| EngineError::UserNotFound(target.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clustering::ClusterAssigner;
    use data_loader::{RatingMatrixBuilder, RatingRecord};

    fn matrix_from(triples: &[(&str, &str, f32)]) -> RatingMatrix {
        let mut builder = RatingMatrixBuilder::new();
        for &(user, movie, rating) in triples {
            builder.add(&RatingRecord {
                user_id: user.to_string(),
                movie_id: movie.to_string(),
                rating,
            });
        }
        builder.build().unwrap()
    }

    fn assign(matrix: &RatingMatrix, k: usize) -> ClusterAssignment {
        ClusterAssigner::new(k)
            .assign(&matrix.movie_user_table())
            .unwrap()
    }

    #[test]
    fn test_seen_movies_in_column_order() {
        let matrix = matrix_from(&[
            ("a", "m1", 5.0),
            ("b", "m2", 3.0),
            ("a", "m3", 4.0),
        ]);
        let clusters = assign(&matrix, 1);
        let engine = RecommendationEngine::new(&matrix, &clusters);

        assert_eq!(engine.seen_movies(&"a".to_string()).unwrap(), vec!["m1", "m3"]);
    }

    #[test]
    fn test_seen_and_ranked_partition_the_movie_set() {
        let matrix = matrix_from(&[
            ("a", "m1", 5.0),
            ("a", "m2", 4.0),
            ("b", "m1", 4.0),
            ("b", "m3", 3.0),
            ("b", "m4", 2.0),
        ]);
        let clusters = assign(&matrix, 1);
        let engine = RecommendationEngine::new(&matrix, &clusters);

        let target = "a".to_string();
        let seen = engine.seen_movies(&target).unwrap();
        let ranked = engine.recommend(&target).unwrap();

        let seen_set: HashSet<&MovieId> = seen.iter().collect();
        let ranked_set: HashSet<&MovieId> = ranked.iter().collect();
        assert!(seen_set.is_disjoint(&ranked_set));

        // Every movie is either seen or ranked here because b rated all
        // the movies a didn't
        let mut all: Vec<&MovieId> = seen_set.union(&ranked_set).copied().collect();
        all.sort();
        let mut movies: Vec<&MovieId> = matrix.movies().iter().collect();
        movies.sort();
        assert_eq!(all, movies);
    }

    #[test]
    fn test_peer_sums_rank_by_total_mass() {
        // a's peers: b and c. Unseen by a: m3 (3 + 2 = 5), m4 (4).
        let matrix = matrix_from(&[
            ("a", "m1", 5.0),
            ("b", "m1", 4.0),
            ("b", "m3", 3.0),
            ("b", "m4", 4.0),
            ("c", "m1", 3.0),
            ("c", "m3", 2.0),
        ]);
        let clusters = assign(&matrix, 1);
        let engine = RecommendationEngine::new(&matrix, &clusters);

        assert_eq!(engine.recommend(&"a".to_string()).unwrap(), vec!["m3", "m4"]);
    }

    #[test]
    fn test_target_rated_everything() {
        let matrix = matrix_from(&[
            ("a", "m1", 5.0),
            ("a", "m2", 4.0),
            ("b", "m1", 4.0),
            ("b", "m2", 3.0),
        ]);
        let clusters = assign(&matrix, 1);
        let engine = RecommendationEngine::new(&matrix, &clusters);

        assert!(engine.recommend(&"a".to_string()).unwrap().is_empty());
    }

    #[test]
    fn test_determinism_across_repeated_calls() {
        let matrix = matrix_from(&[
            ("a", "m1", 5.0),
            ("b", "m2", 4.0),
            ("b", "m3", 4.0),
            ("c", "m4", 2.0),
            ("c", "m2", 1.0),
        ]);
        let clusters = assign(&matrix, 1);
        let engine = RecommendationEngine::new(&matrix, &clusters);

        let target = "a".to_string();
        let first = engine.recommend(&target).unwrap();
        let second = engine.recommend(&target).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_user() {
        let matrix = matrix_from(&[("a", "m1", 5.0)]);
        let clusters = assign(&matrix, 1);
        let engine = RecommendationEngine::new(&matrix, &clusters);

        let err = engine.recommend(&"nobody".to_string()).unwrap_err();
        assert!(matches!(err, EngineError::UserNotFound(_)));
    }
}
