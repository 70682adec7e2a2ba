//! Cluster assignment for users of the rating matrix.
//!
//! Each user is a feature vector over all movies, read as one column of
//! the dense movies x users table. Unrated cells enter the feature space
//! as literal zeros, so "never rated" and a hypothetical zero rating are
//! indistinguishable to the distance metric.

use crate::error::Result;
use crate::kmeans::{DEFAULT_SEED, KMeans};
use data_loader::{MovieUserTable, UserId};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Assigns every user of a rating matrix to one of `n_clusters` groups.
pub struct ClusterAssigner {
    /// Number of clusters
    n_clusters: usize,
    /// Seed for centroid initialization
    seed: u64,
    /// Maximum k-means iterations
    max_iter: usize,
}

impl ClusterAssigner {
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            seed: DEFAULT_SEED,
            max_iter: 300,
        }
    }

    /// Configure the clustering seed (default: [`DEFAULT_SEED`])
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Configure the maximum k-means iterations (default: 300)
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Cluster the users of the given movies x users table.
    ///
    /// Deterministic for a fixed seed and input. Fails with
    /// [`crate::ConfigError`] when the cluster count doesn't fit the user
    /// count.
    #[instrument(skip(self, table), fields(clusters = self.n_clusters))]
    pub fn assign(&self, table: &MovieUserTable) -> Result<ClusterAssignment> {
        let samples: Vec<Vec<f32>> = (0..table.n_users())
            .map(|user_col| table.user_column(user_col))
            .collect();

        let mut kmeans = KMeans::new(self.n_clusters)
            .with_seed(self.seed)
            .with_max_iter(self.max_iter);
        kmeans.fit(&samples)?;

        debug!(
            users = table.n_users(),
            iterations = kmeans.n_iter(),
            "assigned users to clusters"
        );

        Ok(ClusterAssignment {
            labels: kmeans.labels().to_vec(),
            n_clusters: self.n_clusters,
        })
    }
}

/// Cluster label per user row, in the matrix's row order.
#[derive(Debug, Clone)]
pub struct ClusterAssignment {
    labels: Vec<usize>,
    n_clusters: usize,
}

impl ClusterAssignment {
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Labels indexed by user row
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Label of one user row
    pub fn label_of_row(&self, row: usize) -> Option<usize> {
        self.labels.get(row).copied()
    }

    /// User rows carrying the given label, in row order
    pub fn rows_in(&self, label: usize) -> impl Iterator<Item = usize> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter(move |&(_, &l)| l == label)
            .map(|(row, _)| row)
    }

    /// Mapping from user identifier to cluster label.
    ///
    /// `users` must be the row-ordered user list of the matrix this
    /// assignment was computed from.
    pub fn user_labels(&self, users: &[UserId]) -> HashMap<UserId, usize> {
        users
            .iter()
            .zip(&self.labels)
            .map(|(user, &label)| (user.clone(), label))
            .collect()
    }
}
