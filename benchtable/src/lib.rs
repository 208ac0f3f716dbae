#![warn(missing_docs)]
//! # Benchtable
//!
//! Render benchmark results collected across software revisions as one
//! GitHub-flavored markdown comparison table.
//!
//! - **Automatic Units**: ns/μs/ms/s/h for time, B/KB/MB/GB for memory, plain/K/M for allocation counts
//! - **Fixed Units**: force a time unit for the whole table (`time_to_load` keeps its own)
//! - **Row Alignment**: benchmarks present in only some revisions still get a row
//! - **Ratio Column**: two-revision comparisons with propagated interquartile uncertainty
//! - **Pluggable Formatting**: built-in median and memory formatters, or any `CellFormatter`
//!
//! ## Quick Start
//!
//! ```ignore
//! use benchtable::prelude::*;
//!
//! let results = CombinedResults::new()
//!     .with("dirty", RevisionResult::new().with("sum", Distribution::new(0.0025)))
//!     .with("main", RevisionResult::new().with("sum", Distribution::new(0.0020)));
//!
//! let table = build_table(&results, &TableOptions::new())?;
//! println!("{table}");
//! ```
//!
//! ## Loading Result Files
//!
//! ```ignore
//! let revs = parse_revisions("dirty,main");
//! let results = load_results("MyPackage", &revs, "bench-results")?;
//! ```

// Re-export data model
pub use benchtable_core::{
    CombinedResults, Distribution, Quartiles, RevisionResult, Stat, StatError, TIME_TO_LOAD,
    compute_quartiles,
};

// Re-export unit selection
pub use benchtable_units::{
    Domain, Unit, UnitError, format_significant, select_unit, select_unit_fixed,
};

// Re-export table engine
pub use benchtable_report::{
    CellFormatter, Formatter, Metric, Table, TableError, TableOptions, build_grid, build_table,
    format_memory, format_time, render_markdown, row_keys, truncate_label,
};

// Re-export loader and CLI entry points
pub use benchtable_cli::{
    BenchtableConfig, Cli, LoadError, ResultsLoader, load_results, parse_revisions, render_tables,
    run,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        CellFormatter, CombinedResults, Distribution, RevisionResult, Stat, TableError,
        TableOptions, build_table, load_results, parse_revisions,
    };
}
