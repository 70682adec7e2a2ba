//! # Engine Crate
//!
//! The recommendation core: given a rating matrix and a cluster
//! assignment, rank the movies a target user hasn't seen by the total
//! rating their cluster peers gave them.
//!
//! ## Components
//!
//! - **recommend**: RecommendationEngine (peer aggregation and ranking)
//! - **selection**: random target-user selection with injectable RNG
//! - **cycle**: RecommendationCycle, the end-to-end orchestration
//! - **error**: typed failures (unknown user, ingestion, configuration)
//!
//! ## Example Usage
//!
//! ```ignore
//! use engine::RecommendationCycle;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let cycle = RecommendationCycle::new(3);
//! let mut rng = StdRng::seed_from_u64(7);
//! let report = cycle.run(&dataset.matrix, &mut rng)?;
//! println!("{} recommendations for {}", report.recommended.len(), report.target_user);
//! ```

// Public modules
pub mod cycle;
pub mod error;
pub mod recommend;
pub mod selection;

// Re-export commonly used types
pub use cycle::{CycleReport, RecommendationCycle};
pub use error::{EngineError, Result};
pub use recommend::RecommendationEngine;
pub use selection::select_user;
