//! Target-user selection.
//!
//! The random source is a caller-supplied generator, so tests (and
//! reproducible runs) can pass a seeded one.

use crate::error::{EngineError, Result};
use data_loader::UserId;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Pick one user uniformly at random.
pub fn select_user<'a, R: Rng + ?Sized>(users: &'a [UserId], rng: &mut R) -> Result<&'a UserId> {
    users.choose(rng).ok_or(EngineError::NoUsers)
}
