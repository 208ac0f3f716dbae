//! Comparison Table
//!
//! Lines up the benchmarks of every revision into one grid:
//! - one row per benchmark name, `time_to_load` last
//! - one column per revision, formatted by a [`CellFormatter`]
//! - a ratio column when exactly two revisions are compared

use crate::error::TableError;
use crate::formatter::{CellFormatter, Formatter, Metric};
use crate::markdown::render_markdown;
use benchtable_core::{CombinedResults, Stat, TIME_TO_LOAD};
use benchtable_units::{format_significant, select_unit_fixed};
use std::collections::HashSet;

/// Revision labels longer than this are shortened in headers
pub const MAX_LABEL_LEN: usize = 14;

/// Options for [`build_table`]
#[derive(Clone, Copy)]
pub struct TableOptions<'a> {
    /// Metric key: `"median"` or `"memory"`
    pub key: &'a str,
    /// Add a ratio column when exactly two revisions are present
    pub add_ratio: bool,
    /// Fixed time unit (`ns`, `μs`/`us`, `ms`, `s`, `h`) for the default formatter
    pub fixed_unit: Option<&'a str>,
    /// Replaces the default formatter for every cell
    pub formatter: Option<&'a dyn CellFormatter>,
}

impl Default for TableOptions<'_> {
    fn default() -> Self {
        Self {
            key: "median",
            add_ratio: true,
            fixed_unit: None,
            formatter: None,
        }
    }
}

impl<'a> TableOptions<'a> {
    /// Default options: median times, ratio column on, automatic units
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the metric key
    pub fn key(mut self, key: &'a str) -> Self {
        self.key = key;
        self
    }

    /// Enable or disable the ratio column
    pub fn ratio(mut self, add_ratio: bool) -> Self {
        self.add_ratio = add_ratio;
        self
    }

    /// Force a time unit
    pub fn fixed_unit(mut self, unit: &'a str) -> Self {
        self.fixed_unit = Some(unit);
        self
    }

    /// Use a custom cell formatter
    pub fn formatter(mut self, formatter: &'a dyn CellFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }
}

impl std::fmt::Debug for TableOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableOptions")
            .field("key", &self.key)
            .field("add_ratio", &self.add_ratio)
            .field("fixed_unit", &self.fixed_unit)
            .field("custom_formatter", &self.formatter.is_some())
            .finish()
    }
}

/// A formatted table before rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Column titles; the first is empty
    pub header: Vec<String>,
    /// Cells, column-major. Column 0 holds the row keys.
    pub columns: Vec<Vec<String>>,
}

impl Table {
    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Cell at `row`, `column`
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.columns.get(column)?.get(row).map(String::as_str)
    }

    /// Render as fixed-width markdown
    pub fn to_markdown(&self) -> String {
        render_markdown(&self.header, &self.columns)
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_markdown())
    }
}

/// Build and render the comparison table as markdown.
///
/// # Errors
/// - [`TableError::EmptyResults`] when `results` has no revision
/// - [`TableError::UnknownMetric`] for a key other than `median`/`memory`
/// - [`TableError::UnknownUnit`] for an unrecognized fixed unit
pub fn build_table(
    results: &CombinedResults,
    options: &TableOptions<'_>,
) -> Result<String, TableError> {
    build_grid(results, options).map(|table| table.to_markdown())
}

/// Build the formatted grid without rendering it
pub fn build_grid(
    results: &CombinedResults,
    options: &TableOptions<'_>,
) -> Result<Table, TableError> {
    if results.is_empty() {
        return Err(TableError::EmptyResults);
    }

    let metric: Metric = options.key.parse()?;
    let fixed_unit = options.fixed_unit.map(select_unit_fixed).transpose()?;
    let default_formatter = Formatter::for_metric(metric, fixed_unit);
    let formatter = options.formatter.unwrap_or(&default_formatter);

    let rows = row_keys(results);
    let labels: Vec<String> = results.labels().map(truncate_label).collect();

    let mut header = Vec::with_capacity(labels.len() + 2);
    header.push(String::new());
    header.extend(labels.iter().cloned());

    let mut columns = Vec::with_capacity(labels.len() + 2);
    columns.push(rows.clone());
    for (_, revision) in results.iter() {
        let column = rows
            .iter()
            .map(|row| formatter.format(revision.get(row).unwrap_or(&Stat::Missing), row))
            .collect();
        columns.push(column);
    }

    if options.add_ratio && results.len() == 2 {
        header.push(format!("{} / {}", labels[0], labels[1]));
        columns.push(ratio_column(results, &rows, metric)?);
    }

    Ok(Table { header, columns })
}

/// Union of benchmark names across revisions.
///
/// Names of the first revision come first in their order, then names only
/// seen in later revisions in encounter order. `time_to_load` is moved last.
pub fn row_keys(results: &CombinedResults) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys: Vec<String> = results
        .iter()
        .flat_map(|(_, revision)| revision.names())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect();

    if let Some(pos) = keys.iter().position(|k| k == TIME_TO_LOAD) {
        let key = keys.remove(pos);
        keys.push(key);
    }
    keys
}

/// Shorten a revision label to fit a column header
pub fn truncate_label(label: &str) -> String {
    if label.chars().count() > MAX_LABEL_LEN {
        let head: String = label.chars().take(MAX_LABEL_LEN - 1).collect();
        format!("{head}...")
    } else {
        label.to_string()
    }
}

/// One side of a ratio
#[derive(Debug, Clone, Copy)]
struct RatioTerm {
    value: f64,
    /// Half the interquartile range, when both quartiles are known
    err: Option<f64>,
}

impl RatioTerm {
    fn from_stat(stat: &Stat, metric: Metric) -> Option<Self> {
        let value = metric.value_of(stat)?;
        let err = match metric {
            Metric::Median => stat
                .as_distribution()
                .and_then(|dist| dist.spread())
                .map(|spread| spread / 2.0),
            Metric::Memory => None,
        };
        Some(Self { value, err })
    }
}

fn ratio_column(
    results: &CombinedResults,
    rows: &[String],
    metric: Metric,
) -> Result<Vec<String>, TableError> {
    rows.iter()
        .map(|row| ratio_cell(results, row, metric))
        .collect()
}

fn ratio_cell(results: &CombinedResults, row: &str, metric: Metric) -> Result<String, TableError> {
    let mut terms = Vec::with_capacity(2);
    for (_, revision) in results.iter() {
        match revision
            .get(row)
            .and_then(|stat| RatioTerm::from_stat(stat, metric))
        {
            Some(term) => terms.push(term),
            None => return Ok(String::new()),
        }
    }

    let [a, b] = terms.as_slice() else {
        return Err(TableError::RatioColumnCountMismatch(terms.len()));
    };

    let ratio = a.value / b.value;
    if !ratio.is_finite() {
        return Ok(String::new());
    }

    let mut cell = format_significant(ratio, 3);
    if let (Some(err_a), Some(err_b)) = (a.err, b.err) {
        let ratio_err =
            ratio.abs() * ((err_a / a.value).powi(2) + (err_b / b.value).powi(2)).sqrt();
        if ratio_err.is_finite() {
            cell.push_str(" ± ");
            cell.push_str(&format_significant(ratio_err, 2));
        }
    }
    Ok(cell)
}
