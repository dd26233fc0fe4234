//! Parse many SpudText pages at once on a rayon thread pool.
#![deny(missing_docs)]

/// Batch input, output and option types.
pub mod types;

mod run;

pub use run::parse_batch;
pub use types::{BatchInput, BatchOptions, BatchProcessingResult, BatchResult, BatchStats};
