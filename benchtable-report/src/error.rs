//! Table Errors

use benchtable_units::UnitError;
use thiserror::Error;

/// Failures while building a comparison table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The metric key is neither `median` nor `memory`
    #[error("Unknown metric: {0} (expected \"median\" or \"memory\")")]
    UnknownMetric(String),

    /// A fixed time unit could not be resolved
    #[error(transparent)]
    UnknownUnit(#[from] UnitError),

    /// No revisions were supplied, so there are no rows to derive
    #[error("No revisions to tabulate")]
    EmptyResults,

    /// Internal invariant: a ratio is always taken between exactly two values
    #[error("Ratio column expects exactly 2 values, collected {0}")]
    RatioColumnCountMismatch(usize),
}
