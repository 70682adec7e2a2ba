//! Sparse user x movie rating matrix.
//!
//! The builder accumulates the rating stream into per-user sparse rows.
//! User rows and movie columns are assigned dense indices in first-seen
//! order; that order is load-bearing because it is the tie-break used when
//! ranking recommendations. A cell holds 0.0 when the user never rated the
//! movie, so every stored rating must be strictly positive.

use crate::error::{InputError, Result};
use crate::types::{MovieId, RatingRecord, UserId};
use std::collections::HashMap;

/// Builder that turns a stream of [`RatingRecord`]s into a [`RatingMatrix`].
#[derive(Debug, Default)]
pub struct RatingMatrixBuilder {
    users: Vec<UserId>,
    user_rows: HashMap<UserId, usize>,
    movies: Vec<MovieId>,
    movie_cols: HashMap<MovieId, usize>,
    /// One sparse row per user: movie column -> rating
    rows: Vec<HashMap<usize, f32>>,
}

impl RatingMatrixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one rating to the matrix.
    ///
    /// First-seen users and movies get the next free row/column index.
    /// A repeated (user, movie) pair silently overwrites the earlier value;
    /// last write wins.
    pub fn add(&mut self, record: &RatingRecord) {
        let row = match self.user_rows.get(&record.user_id) {
            Some(&row) => row,
            None => {
                let row = self.users.len();
                self.users.push(record.user_id.clone());
                self.user_rows.insert(record.user_id.clone(), row);
                self.rows.push(HashMap::new());
                row
            }
        };

        let col = match self.movie_cols.get(&record.movie_id) {
            Some(&col) => col,
            None => {
                let col = self.movies.len();
                self.movies.push(record.movie_id.clone());
                self.movie_cols.insert(record.movie_id.clone(), col);
                col
            }
        };

        self.rows[row].insert(col, record.rating);
    }

    /// Finish construction, validating internal consistency.
    ///
    /// The validation cannot fail through this builder's public API (rows
    /// and columns come from the same stream the cells do); it guards
    /// against future construction paths.
    pub fn build(self) -> Result<RatingMatrix> {
        let matrix = RatingMatrix {
            users: self.users,
            user_rows: self.user_rows,
            movies: self.movies,
            movie_cols: self.movie_cols,
            rows: self.rows,
        };
        matrix.validate()?;
        Ok(matrix)
    }
}

impl Extend<RatingRecord> for RatingMatrixBuilder {
    fn extend<I: IntoIterator<Item = RatingRecord>>(&mut self, iter: I) {
        for record in iter {
            self.add(&record);
        }
    }
}

/// Sparse users x movies rating matrix with stable first-seen ordering.
#[derive(Debug)]
pub struct RatingMatrix {
    users: Vec<UserId>,
    user_rows: HashMap<UserId, usize>,
    movies: Vec<MovieId>,
    movie_cols: HashMap<MovieId, usize>,
    rows: Vec<HashMap<usize, f32>>,
}

impl RatingMatrix {
    pub fn n_users(&self) -> usize {
        self.users.len()
    }

    pub fn n_movies(&self) -> usize {
        self.movies.len()
    }

    /// User identifiers in row order
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// Movie identifiers in column order
    pub fn movies(&self) -> &[MovieId] {
        &self.movies
    }

    /// Row index of a user, if the user appears in the rating stream
    pub fn user_row(&self, user_id: &str) -> Option<usize> {
        self.user_rows.get(user_id).copied()
    }

    /// Column index of a movie, if the movie appears in the rating stream
    pub fn movie_col(&self, movie_id: &str) -> Option<usize> {
        self.movie_cols.get(movie_id).copied()
    }

    pub fn user_at(&self, row: usize) -> &UserId {
        &self.users[row]
    }

    pub fn movie_at(&self, col: usize) -> &MovieId {
        &self.movies[col]
    }

    /// Rating at (row, col); 0.0 means unrated
    pub fn rating(&self, row: usize, col: usize) -> f32 {
        self.rows[row].get(&col).copied().unwrap_or(0.0)
    }

    /// Iterate the rated cells of one user row as (column, rating) pairs,
    /// in no particular order
    pub fn row_entries(&self, row: usize) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.rows[row].iter().map(|(&col, &rating)| (col, rating))
    }

    /// Columns the user has rated, in column order
    pub fn seen_cols(&self, row: usize) -> Vec<usize> {
        let mut cols: Vec<usize> = self.rows[row].keys().copied().collect();
        cols.sort_unstable();
        cols
    }

    /// Total number of rated cells across all rows
    pub fn rated_cells(&self) -> usize {
        self.rows.iter().map(|r| r.len()).sum()
    }

    /// Materialize the dense movies x users table used for clustering.
    pub fn movie_user_table(&self) -> MovieUserTable {
        let n_movies = self.n_movies();
        let n_users = self.n_users();
        let mut values = vec![0.0_f32; n_movies * n_users];

        for (row, entries) in self.rows.iter().enumerate() {
            for (&col, &rating) in entries {
                values[col * n_users + row] = rating;
            }
        }

        MovieUserTable {
            n_movies,
            n_users,
            values,
        }
    }

    /// Consistency check: one sparse row per user, all column indices in
    /// range, all stored ratings strictly positive.
    pub fn validate(&self) -> Result<()> {
        if self.rows.len() != self.users.len() {
            return Err(InputError::Inconsistent(format!(
                "{} sparse rows for {} users",
                self.rows.len(),
                self.users.len()
            )));
        }

        for (row, entries) in self.rows.iter().enumerate() {
            for (&col, &rating) in entries {
                if col >= self.movies.len() {
                    return Err(InputError::Inconsistent(format!(
                        "row {} references column {} of {}",
                        row,
                        col,
                        self.movies.len()
                    )));
                }
                if !(rating > 0.0) {
                    return Err(InputError::Inconsistent(format!(
                        "row {row} column {col} holds non-positive rating {rating}"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Dense movies x users table, row-major with movies as rows.
///
/// This is the transposed materialization of the sparse matrix: the user
/// vectors consumed by clustering are its columns. Unrated cells appear as
/// literal zeros here.
#[derive(Debug, Clone)]
pub struct MovieUserTable {
    n_movies: usize,
    n_users: usize,
    values: Vec<f32>,
}

impl MovieUserTable {
    pub fn n_movies(&self) -> usize {
        self.n_movies
    }

    pub fn n_users(&self) -> usize {
        self.n_users
    }

    pub fn get(&self, movie_row: usize, user_col: usize) -> f32 {
        self.values[movie_row * self.n_users + user_col]
    }

    /// One user's dense rating vector over all movies
    pub fn user_column(&self, user_col: usize) -> Vec<f32> {
        (0..self.n_movies)
            .map(|movie_row| self.get(movie_row, user_col))
            .collect()
    }
}
