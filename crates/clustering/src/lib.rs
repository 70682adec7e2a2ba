//! # Clustering Crate
//!
//! Groups users by rating behavior.
//!
//! ## Components
//!
//! - **kmeans**: seeded K-means (Lloyd's algorithm, k-means++ init)
//! - **assigner**: ClusterAssigner mapping users of a rating matrix to
//!   cluster labels
//! - **error**: configuration errors (cluster count vs. sample count)
//!
//! ## Example Usage
//!
//! ```ignore
//! use clustering::ClusterAssigner;
//!
//! let table = dataset.matrix.movie_user_table();
//! let assignment = ClusterAssigner::new(3).with_seed(42).assign(&table)?;
//! let label = assignment.label_of_row(0);
//! ```
//!
//! A fixed seed makes the assignment reproducible run to run; the number
//! of clusters is always caller-supplied and never inferred or clamped.

// Public modules
pub mod assigner;
pub mod error;
pub mod kmeans;

// Re-export commonly used types
pub use assigner::{ClusterAssigner, ClusterAssignment};
pub use error::{ConfigError, Result};
pub use kmeans::{DEFAULT_SEED, KMeans};
