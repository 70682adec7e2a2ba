//! Parser for the newline-delimited JSON input feeds.
//!
//! Two feeds are consumed:
//! - rating stream: one `{"userId": ..., "title_id": ..., "rating": ...}`
//!   object per line
//! - movie metadata: one `{"title_id": ..., "title_name": ..., "actor_ids":
//!   [...], "actor_names": [...], "title_genre": ...}` object per line

use crate::error::{InputError, Result};
use crate::types::{MovieRecord, RatingRecord};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a feed file into lines, mapping a missing file to a dedicated error.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => InputError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => InputError::Io(e),
    })?;

    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Display label for a feed file, used in parse errors.
fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the rating stream.
///
/// Empty lines are skipped. Non-positive ratings are rejected: the matrix
/// uses 0 as its "unrated" sentinel, so every real rating must be strictly
/// positive.
pub fn parse_ratings(path: &Path) -> Result<Vec<RatingRecord>> {
    let file = file_label(path);
    let lines = read_lines(path)?;
    let mut ratings = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let record: RatingRecord =
            serde_json::from_str(trimmed).map_err(|e| InputError::Parse {
                file: file.clone(),
                line: line_no,
                reason: e.to_string(),
            })?;

        if !(record.rating > 0.0) {
            return Err(InputError::InvalidValue {
                field: "rating".to_string(),
                value: record.rating.to_string(),
            });
        }

        ratings.push(record);
    }

    Ok(ratings)
}

/// Parse the movie metadata feed.
///
/// Empty lines are skipped. Records whose `actor_ids` and `actor_names`
/// lists have different lengths are rejected.
pub fn parse_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    let file = file_label(path);
    let lines = read_lines(path)?;
    let mut movies = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let record: MovieRecord =
            serde_json::from_str(trimmed).map_err(|e| InputError::Parse {
                file: file.clone(),
                line: line_no,
                reason: e.to_string(),
            })?;

        if record.actor_ids.len() != record.actor_names.len() {
            return Err(InputError::Parse {
                file: file.clone(),
                line: line_no,
                reason: format!(
                    "actor_ids has {} entries but actor_names has {}",
                    record.actor_ids.len(),
                    record.actor_names.len()
                ),
            });
        }

        movies.push(record);
    }

    Ok(movies)
}
