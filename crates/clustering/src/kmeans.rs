//! K-means clustering.
//!
//! Lloyd's algorithm with k-means++ initialization. All randomness comes
//! from a seeded `StdRng`, so a fixed seed yields the same labels on every
//! run. The assignment step is data-parallel; each sample's nearest
//! centroid is independent of the others and ties resolve to the lowest
//! centroid index, so parallelism never changes the result.

use crate::error::{ConfigError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

/// Default seed for centroid initialization.
pub const DEFAULT_SEED: u64 = 42;

/// K-means estimator.
///
/// ## Usage
/// ```ignore
/// let mut kmeans = KMeans::new(3).with_seed(42);
/// kmeans.fit(&samples)?;
/// let labels = kmeans.labels();
/// ```
#[derive(Debug, Clone)]
pub struct KMeans {
    /// Number of clusters
    n_clusters: usize,
    /// Maximum Lloyd iterations
    max_iter: usize,
    /// Convergence tolerance on centroid movement (Euclidean)
    tol: f32,
    /// Seed for centroid initialization
    seed: u64,
    /// Cluster centroids after fitting
    centroids: Vec<Vec<f32>>,
    /// Label per training sample after fitting
    labels: Vec<usize>,
    /// Sum of squared distances to assigned centroids
    inertia: f32,
    /// Iterations actually run
    n_iter: usize,
}

impl KMeans {
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            max_iter: 300,
            tol: 1e-4,
            seed: DEFAULT_SEED,
            centroids: Vec::new(),
            labels: Vec::new(),
            inertia: 0.0,
            n_iter: 0,
        }
    }

    /// Configure the maximum number of iterations (default: 300)
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Configure the convergence tolerance (default: 1e-4)
    pub fn with_tol(mut self, tol: f32) -> Self {
        self.tol = tol;
        self
    }

    /// Configure the initialization seed (default: [`DEFAULT_SEED`])
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    pub fn is_fitted(&self) -> bool {
        !self.centroids.is_empty()
    }

    /// Label per training sample; empty before `fit`
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Cluster centroids; empty before `fit`
    pub fn centroids(&self) -> &[Vec<f32>] {
        &self.centroids
    }

    /// Sum of squared distances of samples to their assigned centroid
    pub fn inertia(&self) -> f32 {
        self.inertia
    }

    /// Iterations run by the last `fit`
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Fit the estimator on a sample set (one feature vector per sample).
    ///
    /// Fails with [`ConfigError`] when the cluster count is zero or larger
    /// than the sample count, the sample set is empty, or the sample
    /// vectors disagree on dimensionality.
    pub fn fit(&mut self, samples: &[Vec<f32>]) -> Result<()> {
        if self.n_clusters < 1 {
            return Err(ConfigError::InvalidClusterCount(self.n_clusters));
        }
        if samples.is_empty() {
            return Err(ConfigError::EmptySampleSet);
        }
        let dim = samples[0].len();
        for sample in samples {
            if sample.len() != dim {
                return Err(ConfigError::DimensionMismatch {
                    first: dim,
                    other: sample.len(),
                });
            }
        }
        if self.n_clusters > samples.len() {
            return Err(ConfigError::TooManyClusters {
                clusters: self.n_clusters,
                samples: samples.len(),
            });
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut centroids = self.init_centroids(samples, &mut rng);
        let mut labels = vec![0_usize; samples.len()];
        let mut inertia = 0.0_f32;
        let mut n_iter = 0;

        for iter in 0..self.max_iter {
            n_iter = iter + 1;

            // Assignment step: nearest centroid per sample
            let assigned: Vec<(usize, f32)> = samples
                .par_iter()
                .map(|sample| nearest_centroid(sample, &centroids))
                .collect();

            let changed = assigned
                .iter()
                .zip(&labels)
                .any(|(&(label, _), &old)| label != old);
            inertia = assigned.iter().map(|&(_, dist_sq)| dist_sq).sum();
            for (slot, &(label, _)) in labels.iter_mut().zip(&assigned) {
                *slot = label;
            }

            // Update step: centroid = mean of assigned samples. A cluster
            // that lost all its samples keeps its previous centroid.
            let mut sums = vec![vec![0.0_f32; dim]; self.n_clusters];
            let mut counts = vec![0_usize; self.n_clusters];
            for (sample, &label) in samples.iter().zip(&labels) {
                counts[label] += 1;
                for (acc, &value) in sums[label].iter_mut().zip(sample) {
                    *acc += value;
                }
            }

            let mut max_shift_sq = 0.0_f32;
            for (cluster, count) in counts.iter().enumerate() {
                if *count == 0 {
                    continue;
                }
                let new_centroid: Vec<f32> = sums[cluster]
                    .iter()
                    .map(|&sum| sum / *count as f32)
                    .collect();
                let shift_sq = squared_distance(&centroids[cluster], &new_centroid);
                if shift_sq > max_shift_sq {
                    max_shift_sq = shift_sq;
                }
                centroids[cluster] = new_centroid;
            }

            if !changed || max_shift_sq < self.tol * self.tol {
                break;
            }
        }

        debug!(
            clusters = self.n_clusters,
            samples = samples.len(),
            iterations = n_iter,
            inertia,
            "k-means fit complete"
        );

        self.centroids = centroids;
        self.labels = labels;
        self.inertia = inertia;
        self.n_iter = n_iter;
        Ok(())
    }

    /// k-means++ seeding: the first centroid is a uniform draw, each later
    /// one is drawn with probability proportional to its squared distance
    /// from the nearest centroid chosen so far.
    fn init_centroids(&self, samples: &[Vec<f32>], rng: &mut StdRng) -> Vec<Vec<f32>> {
        let n = samples.len();
        let mut centroids: Vec<Vec<f32>> = Vec::with_capacity(self.n_clusters);
        centroids.push(samples[rng.random_range(0..n)].clone());

        while centroids.len() < self.n_clusters {
            let weights: Vec<f32> = samples
                .iter()
                .map(|sample| {
                    centroids
                        .iter()
                        .map(|c| squared_distance(sample, c))
                        .fold(f32::INFINITY, f32::min)
                })
                .collect();
            let total: f32 = weights.iter().sum();

            let chosen = if total > 0.0 {
                let mut target = rng.random::<f32>() * total;
                let mut chosen = None;
                for (i, &weight) in weights.iter().enumerate() {
                    if weight <= 0.0 {
                        continue;
                    }
                    target -= weight;
                    chosen = Some(i);
                    if target <= 0.0 {
                        break;
                    }
                }
                // rounding can leave a sliver of target after the loop;
                // the last positive-weight sample absorbs it
                chosen.unwrap_or(0)
            } else {
                // Every sample coincides with a centroid already
                rng.random_range(0..n)
            };

            centroids.push(samples[chosen].clone());
        }

        centroids
    }
}

/// Index and squared distance of the nearest centroid. Ties go to the
/// lowest index.
fn nearest_centroid(sample: &[f32], centroids: &[Vec<f32>]) -> (usize, f32) {
    let mut best = 0;
    let mut best_dist = squared_distance(sample, &centroids[0]);
    for (i, centroid) in centroids.iter().enumerate().skip(1) {
        let dist = squared_distance(sample, centroid);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    (best, best_dist)
}

/// Squared Euclidean distance; the square root is never needed for
/// comparisons.
fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (x - y) * (x - y))
        .sum()
}
