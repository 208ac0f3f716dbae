#![warn(missing_docs)]
//! Benchtable CLI Library
//!
//! Reads benchmark result files for several revisions of a package and prints
//! one markdown comparison table per requested mode.
//!
//! # Example
//!
//! ```text
//! benchtable MyPackage --rev dirty,main --ratio --mode time,memory --unit ms
//! ```

mod config;
mod loader;
mod revision;

pub use config::*;
pub use loader::{LoadError, ResultsLoader, load_results, read_result_file};
pub use revision::{
    DEFAULT_BRANCH, DIRTY, package_name, parse_revisions, resolve_revision, resolve_revisions,
};

use anyhow::Context;
use benchtable_core::CombinedResults;
use benchtable_report::{Metric, TableError, TableOptions, build_table};
use benchtable_units::select_unit_fixed;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Benchtable CLI arguments
#[derive(Parser, Debug)]
#[command(name = "benchtable")]
#[command(
    author,
    version,
    about = "Benchtable - compare benchmark results across revisions"
)]
pub struct Cli {
    /// Optional subcommand; defaults to printing tables
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Package name (derived from --path or --url when omitted)
    pub package: Option<String>,

    /// Local source path of the package
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Repository URL of the package
    #[arg(long)]
    pub url: Option<String>,

    /// Comma-delimited revisions; the first is the ratio numerator
    #[arg(long)]
    pub rev: Option<String>,

    /// Directory holding the result files
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Add a ratio column when exactly two revisions are compared
    #[arg(long)]
    pub ratio: bool,

    /// Comma-delimited table modes: time, memory
    #[arg(long)]
    pub mode: Option<String>,

    /// Fixed time unit: ns, μs, us, ms, s, h
    #[arg(long)]
    pub unit: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a default benchtable.toml
    Init,
}

/// Run the Benchtable CLI with the process arguments.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Benchtable CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Logs go to stderr so tables on stdout stay pipeable
    let filter = if cli.verbose {
        "benchtable_cli=debug"
    } else {
        "benchtable_cli=info"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    if let Some(Commands::Init) = cli.command {
        print!("{}", BenchtableConfig::default_toml());
        return Ok(());
    }

    let config = BenchtableConfig::discover().unwrap_or_default();

    let modes = cli
        .mode
        .as_deref()
        .map(parse_list)
        .unwrap_or_else(|| config.table.modes.clone());
    let unit = cli.unit.clone().or_else(|| config.table.unit.clone());
    let ratio = cli.ratio || config.table.ratio;

    // Validate before loading anything so a typo fails fast
    let metrics = parse_modes(&modes)?;
    if let Some(unit) = unit.as_deref() {
        select_unit_fixed(unit)?;
    }

    let package = package_name(
        cli.package.as_deref(),
        cli.path.as_deref(),
        cli.url.as_deref(),
    )?;
    let requested = cli
        .rev
        .as_deref()
        .map(parse_revisions)
        .unwrap_or_else(|| config.revisions.default.clone());
    let revisions = resolve_revisions(&requested, cli.path.as_deref())?;

    let input_dir = cli
        .input_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.input.directory));
    tracing::info!(
        package = %package,
        revisions = ?revisions,
        input_dir = %input_dir.display(),
        "loading benchmark results"
    );

    let loader = ResultsLoader::new(input_dir, config.input.clone());
    let combined = loader
        .load_results(&package, &revisions)
        .with_context(|| format!("Failed to load results for {package}"))?;

    let tables = render_metrics(&combined, &metrics, ratio, unit.as_deref())?;
    for table in tables {
        println!("{table}\n");
    }

    Ok(())
}

/// Metric key for a table mode: `time` reads medians, `memory` reads
/// allocations. Other strings pass through unchanged.
pub fn mode_key(mode: &str) -> &str {
    match mode {
        "time" => "median",
        "memory" => "memory",
        other => other,
    }
}

/// Parse every mode up front, so an unknown one is reported before any output
pub fn parse_modes(modes: &[String]) -> Result<Vec<Metric>, TableError> {
    modes.iter().map(|mode| mode_key(mode).parse()).collect()
}

/// Render one table per mode, in order
pub fn render_tables(
    results: &CombinedResults,
    modes: &[String],
    add_ratio: bool,
    fixed_unit: Option<&str>,
) -> Result<Vec<String>, TableError> {
    let metrics = parse_modes(modes)?;
    render_metrics(results, &metrics, add_ratio, fixed_unit)
}

fn render_metrics(
    results: &CombinedResults,
    metrics: &[Metric],
    add_ratio: bool,
    fixed_unit: Option<&str>,
) -> Result<Vec<String>, TableError> {
    metrics
        .iter()
        .map(|metric| {
            tracing::debug!(%metric, "building table");
            let options = TableOptions {
                key: metric.key(),
                add_ratio,
                fixed_unit,
                formatter: None,
            };
            build_table(results, &options)
        })
        .collect()
}

fn parse_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchtable_core::{Distribution, RevisionResult};

    fn sample_results() -> CombinedResults {
        CombinedResults::new()
            .with(
                "dirty",
                RevisionResult::new().with(
                    "sum",
                    Distribution::new(0.002).with_allocations(3.0, 2048.0),
                ),
            )
            .with(
                "main",
                RevisionResult::new().with(
                    "sum",
                    Distribution::new(0.001).with_allocations(3.0, 1024.0),
                ),
            )
    }

    #[test]
    fn test_parse_cli() {
        let cli = Cli::try_parse_from([
            "benchtable",
            "MyPkg",
            "--rev",
            "dirty,main",
            "--ratio",
            "--mode",
            "time,memory",
            "--unit",
            "us",
            "-i",
            "results",
        ])
        .unwrap();

        assert_eq!(cli.package.as_deref(), Some("MyPkg"));
        assert_eq!(cli.rev.as_deref(), Some("dirty,main"));
        assert!(cli.ratio);
        assert_eq!(cli.mode.as_deref(), Some("time,memory"));
        assert_eq!(cli.unit.as_deref(), Some("us"));
        assert_eq!(cli.input_dir, Some(PathBuf::from("results")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_init_subcommand() {
        let cli = Cli::try_parse_from(["benchtable", "init"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Init)));
    }

    #[test]
    fn test_mode_key() {
        assert_eq!(mode_key("time"), "median");
        assert_eq!(mode_key("memory"), "memory");
        assert_eq!(mode_key("median"), "median");
        assert_eq!(mode_key("allocations"), "allocations");
    }

    #[test]
    fn test_render_one_table_per_mode() {
        let modes = parse_list("time, memory");
        let tables = render_tables(&sample_results(), &modes, true, None).unwrap();

        assert_eq!(tables.len(), 2);
        assert!(tables[0].contains("2 ms"));
        assert!(tables[0].contains("dirty / main"));
        assert!(tables[1].contains("3 allocs: 2 KB"));
    }

    #[test]
    fn test_unknown_mode_fails_before_any_table() {
        let modes = vec!["time".to_string(), "tme".to_string()];
        assert_eq!(
            render_tables(&sample_results(), &modes, false, None),
            Err(TableError::UnknownMetric("tme".to_string()))
        );
    }

    #[test]
    fn test_fixed_unit_passed_through() {
        let modes = vec!["time".to_string()];
        let tables = render_tables(&sample_results(), &modes, false, Some("us")).unwrap();
        assert!(tables[0].contains("2e+03 μs"));
    }
}
