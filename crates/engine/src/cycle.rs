//! One full recommendation cycle.
//!
//! Coordinates the pieces end to end: materialize the movies x users
//! table, cluster the users, pick (or accept) a target, compute the seen
//! and recommended movie lists. Each cycle is stateless; nothing is
//! cached between runs.

use crate::error::{EngineError, Result};
use crate::recommend::RecommendationEngine;
use crate::selection::select_user;
use clustering::{ClusterAssigner, DEFAULT_SEED};
use data_loader::{MovieId, RatingMatrix, UserId};
use rand::Rng;
use std::time::Instant;
use tracing::{info, instrument};

/// Result of one recommendation cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub target_user: UserId,
    /// Movies the target has rated, in column order
    pub seen: Vec<MovieId>,
    /// Unseen movies ranked by total peer rating
    pub recommended: Vec<MovieId>,
}

/// Runs recommendation cycles over a rating matrix.
pub struct RecommendationCycle {
    /// Number of user clusters
    clusters: usize,
    /// Seed for the clustering step
    cluster_seed: u64,
}

impl RecommendationCycle {
    pub fn new(clusters: usize) -> Self {
        Self {
            clusters,
            cluster_seed: DEFAULT_SEED,
        }
    }

    /// Configure the clustering seed (default: [`DEFAULT_SEED`])
    pub fn with_cluster_seed(mut self, seed: u64) -> Self {
        self.cluster_seed = seed;
        self
    }

    /// Run a cycle for a randomly selected user.
    ///
    /// Only the target selection draws from `rng`; clustering uses the
    /// cycle's own fixed seed.
    pub fn run<R: Rng + ?Sized>(&self, matrix: &RatingMatrix, rng: &mut R) -> Result<CycleReport> {
        let target = select_user(matrix.users(), rng)?.clone();
        self.run_for_user(matrix, &target)
    }

    /// Run a cycle for a specific target user.
    ///
    /// Aborts with the specific typed error on any failure: an unknown
    /// target reports [`EngineError::UserNotFound`] before clustering
    /// starts, a cluster count that doesn't fit the user count surfaces
    /// the clustering error unchanged.
    #[instrument(skip(self, matrix), fields(user = %target, clusters = self.clusters))]
    pub fn run_for_user(&self, matrix: &RatingMatrix, target: &UserId) -> Result<CycleReport> {
        if matrix.user_row(target).is_none() {
            return Err(EngineError::UserNotFound(target.clone()));
        }

        let start = Instant::now();
        let table = matrix.movie_user_table();
        let assignment = ClusterAssigner::new(self.clusters)
            .with_seed(self.cluster_seed)
            .assign(&table)?;

        let engine = RecommendationEngine::new(matrix, &assignment);
        let seen = engine.seen_movies(target)?;
        let recommended = engine.recommend(target)?;

        info!(
            seen = seen.len(),
            recommended = recommended.len(),
            elapsed = ?start.elapsed(),
            "recommendation cycle complete"
        );

        Ok(CycleReport {
            target_user: target.clone(),
            seen,
            recommended,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{RatingMatrixBuilder, RatingRecord};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

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

    #[test]
    fn test_run_selects_target_from_matrix() {
        let matrix = matrix_from(&[
            ("a", "m1", 5.0),
            ("b", "m1", 4.0),
            ("c", "m2", 3.0),
        ]);
        let cycle = RecommendationCycle::new(1);
        let mut rng = StdRng::seed_from_u64(3);

        let report = cycle.run(&matrix, &mut rng).unwrap();
        assert!(matrix.users().contains(&report.target_user));
    }

    #[test]
    fn test_unknown_target_reported_before_bad_cluster_count() {
        let matrix = matrix_from(&[("a", "m1", 5.0)]);
        // Both the target and k are invalid; the target error wins
        let cycle = RecommendationCycle::new(10);

        let err = cycle.run_for_user(&matrix, &"nobody".to_string()).unwrap_err();
        assert!(matches!(err, EngineError::UserNotFound(_)));
    }

    #[test]
    fn test_cluster_count_exceeding_users_is_an_error() {
        let matrix = matrix_from(&[
            ("a", "m1", 5.0),
            ("b", "m2", 4.0),
            ("c", "m3", 3.0),
        ]);
        let cycle = RecommendationCycle::new(5);

        let err = cycle.run_for_user(&matrix, &"a".to_string()).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
