#![warn(missing_docs)]
//! Benchtable Report - Comparison Tables
//!
//! Renders benchmark results from several revisions as one GitHub-flavored
//! markdown table:
//! - Rows aligned across revisions, `time_to_load` last
//! - Cells formatted with automatic or fixed units
//! - Optional ratio column between two revisions, with propagated uncertainty

mod error;
mod formatter;
mod markdown;
mod table;

pub use error::TableError;
pub use formatter::{CellFormatter, Formatter, Metric, format_memory, format_time};
pub use markdown::{MIN_COLUMN_WIDTH, render_markdown};
pub use table::{
    MAX_LABEL_LEN, Table, TableOptions, build_grid, build_table, row_keys, truncate_label,
};
