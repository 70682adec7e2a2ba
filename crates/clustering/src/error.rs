//! Error types for the clustering crate.

use thiserror::Error;

/// Configuration errors raised when clustering parameters don't fit the
/// data. None of these are recoverable within a run; in particular a
/// cluster count larger than the sample count is reported, never clamped.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Cluster count below the minimum of one
    #[error("cluster count must be at least 1, got {0}")]
    InvalidClusterCount(usize),

    /// More clusters requested than there are samples to fill them
    #[error("cluster count {clusters} exceeds sample count {samples}")]
    TooManyClusters { clusters: usize, samples: usize },

    /// No samples to cluster
    #[error("cannot cluster an empty sample set")]
    EmptySampleSet,

    /// Sample vectors disagree on dimensionality
    #[error("sample vectors must share one dimension, found {first} and {other}")]
    DimensionMismatch { first: usize, other: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ConfigError>;
