//! Error types for the recommendation engine.

use clustering::ConfigError;
use data_loader::{InputError, UserId};
use thiserror::Error;

/// Errors a recommendation cycle can abort with. A cycle either fully
/// succeeds or fails with one of these; there is no degraded mode.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The requested target user does not appear in the rating matrix
    #[error("user {0} is not present in the rating matrix")]
    UserNotFound(UserId),

    /// Target selection over an empty user set
    #[error("cannot select a user from an empty rating matrix")]
    NoUsers,

    /// Ingestion or matrix-consistency failure
    #[error(transparent)]
    Input(#[from] InputError),

    /// Clustering configuration failure
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, EngineError>;
