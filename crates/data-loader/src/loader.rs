//! Dataset loading: parse both feeds, build the matrix, build the catalog.

use crate::catalog::{Dataset, MovieCatalog};
use crate::error::Result;
use crate::matrix::RatingMatrixBuilder;
use crate::parser;
use crate::types::MovieId;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Load a full dataset from the two input feeds.
///
/// The feeds are parsed in parallel. The catalog is restricted to movies
/// that appear in the rating stream, so it is built after the matrix.
pub fn load_dataset(ratings_path: &Path, movies_path: &Path) -> Result<Dataset> {
    let (ratings, movie_records) = rayon::join(
        || parser::parse_ratings(ratings_path),
        || parser::parse_movies(movies_path),
    );
    let ratings = ratings?;
    let movie_records = movie_records?;

    info!(
        ratings = ratings.len(),
        metadata_records = movie_records.len(),
        "parsed input feeds"
    );

    let mut builder = RatingMatrixBuilder::new();
    for record in &ratings {
        builder.add(record);
    }
    let matrix = builder.build()?;

    let known_movies: HashSet<MovieId> = matrix.movies().iter().cloned().collect();
    let catalog = MovieCatalog::from_records(movie_records, &known_movies);

    info!(
        users = matrix.n_users(),
        movies = matrix.n_movies(),
        rated_cells = matrix.rated_cells(),
        catalog = catalog.len(),
        "dataset loaded"
    );

    Ok(Dataset { matrix, catalog })
}
