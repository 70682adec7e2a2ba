//! # Data Loader Crate
//!
//! This crate handles ingesting the rating stream and the movie metadata
//! feed, and building the sparse rating matrix the rest of the workspace
//! computes over.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (RatingRecord, MovieRecord, Movie)
//! - **parser**: Parse the newline-delimited JSON feeds
//! - **matrix**: RatingMatrixBuilder and the sparse RatingMatrix
//! - **catalog**: MovieCatalog and ActorIndex lookup tables
//! - **loader**: One-call dataset loading
//! - **error**: Error types for ingestion
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::load_dataset;
//! use std::path::Path;
//!
//! let dataset = load_dataset(
//!     Path::new("data/user_ratings.json"),
//!     Path::new("data/imdb_recent_movies.json"),
//! )?;
//!
//! let matrix = &dataset.matrix;
//! println!("{} users rated {} movies", matrix.n_users(), matrix.n_movies());
//! ```

// Public modules
pub mod catalog;
pub mod error;
pub mod loader;
pub mod matrix;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use catalog::{ActorIndex, Dataset, MovieCatalog};
pub use error::{InputError, Result};
pub use loader::load_dataset;
pub use matrix::{MovieUserTable, RatingMatrix, RatingMatrixBuilder};
pub use types::{ActorId, Movie, MovieId, MovieRecord, RatingRecord, UserId};
