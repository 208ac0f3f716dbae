#![warn(missing_docs)]
//! Benchtable Core
//!
//! Data model shared by the table engine and the results loader:
//! - [`Stat`]: one measurement record (distribution, bare scalar, or missing)
//! - [`RevisionResult`]: ordered benchmark-name to [`Stat`] mapping
//! - [`CombinedResults`]: ordered revision-label to [`RevisionResult`] mapping
//! - Quartile summarization of raw samples

mod percentiles;
mod results;
mod stat;

pub use percentiles::{Quartiles, compute_quartiles, percentile_of_sorted};
pub use results::{CombinedResults, RevisionResult, StatError};
pub use stat::{Distribution, Stat};

/// Benchmark name that always sorts last and always uses automatic units
pub const TIME_TO_LOAD: &str = "time_to_load";
