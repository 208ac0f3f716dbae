//! Cell Formatters
//!
//! Turn one [`Stat`] into the string shown in a table cell. Every formatter is
//! total: absent data yields an empty string, never an error.

use crate::error::TableError;
use benchtable_core::{Stat, TIME_TO_LOAD};
use benchtable_units::{Domain, Unit, format_significant, select_unit};

/// Which measurement a table shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Median time (`"median"`)
    Median,
    /// Allocations and bytes (`"memory"`)
    Memory,
}

impl Metric {
    /// The key naming this metric in result files and options
    pub fn key(self) -> &'static str {
        match self {
            Metric::Median => "median",
            Metric::Memory => "memory",
        }
    }

    /// The value of this metric's field in `stat`, if it has one.
    ///
    /// Bare scalars and missing stats carry no named fields.
    pub fn value_of(self, stat: &Stat) -> Option<f64> {
        let dist = stat.as_distribution()?;
        match self {
            Metric::Median => Some(dist.median),
            Metric::Memory => dist.memory,
        }
    }
}

impl std::str::FromStr for Metric {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "median" => Ok(Metric::Median),
            "memory" => Ok(Metric::Memory),
            other => Err(TableError::UnknownMetric(other.to_string())),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Strategy for rendering a single cell
pub trait CellFormatter {
    /// Render `stat`, which belongs to benchmark `row`
    fn format(&self, stat: &Stat, row: &str) -> String;
}

impl<F> CellFormatter for F
where
    F: Fn(&Stat, &str) -> String,
{
    fn format(&self, stat: &Stat, row: &str) -> String {
        self(stat, row)
    }
}

/// Built-in formatters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Formatter {
    /// Median time with spread. `fixed_unit` applies to every row except
    /// `time_to_load`, which always picks its own unit.
    Median {
        /// Time unit forced on the table, if any
        fixed_unit: Option<Unit>,
    },
    /// Allocation count and allocated bytes
    Memory,
}

impl Formatter {
    /// Default formatter for `metric`
    pub fn for_metric(metric: Metric, fixed_unit: Option<Unit>) -> Self {
        match metric {
            Metric::Median => Formatter::Median { fixed_unit },
            Metric::Memory => Formatter::Memory,
        }
    }
}

impl CellFormatter for Formatter {
    fn format(&self, stat: &Stat, row: &str) -> String {
        match *self {
            Formatter::Median { fixed_unit } => {
                let unit = fixed_unit.filter(|_| row != TIME_TO_LOAD);
                format_time(stat, unit)
            }
            Formatter::Memory => format_memory(stat),
        }
    }
}

/// Render a median with its interquartile spread.
///
/// `unit` forces a time unit; `None` picks one from the median. A bare scalar
/// is displayed as a byte count.
pub fn format_time(stat: &Stat, unit: Option<Unit>) -> String {
    match stat {
        Stat::Missing => String::new(),
        Stat::Scalar(value) => {
            let unit = select_unit(&[*value], Domain::Memory);
            with_unit(format_significant(unit.apply(*value), 3), unit.label)
        }
        Stat::Distribution(dist) => {
            let unit = unit.unwrap_or_else(|| select_unit(&[dist.median], Domain::Time));
            let median = format_significant(unit.apply(dist.median), 3);
            match dist.spread() {
                Some(spread) => with_unit(
                    format!(
                        "{} ± {}",
                        median,
                        format_significant(unit.apply(spread), 2)
                    ),
                    unit.label,
                ),
                None => with_unit(median, unit.label),
            }
        }
    }
}

/// Render `"{allocs} allocs: {memory}"`, or an empty string unless both are present.
pub fn format_memory(stat: &Stat) -> String {
    let Some(dist) = stat.as_distribution() else {
        return String::new();
    };
    let (Some(allocs), Some(memory)) = (dist.allocs, dist.memory) else {
        return String::new();
    };

    let allocs_unit = select_unit(&[allocs], Domain::Allocs);
    let memory_unit = select_unit(&[memory], Domain::Memory);
    format!(
        "{} allocs: {}",
        with_unit(
            format_significant(allocs_unit.apply(allocs), 3),
            allocs_unit.label
        ),
        with_unit(
            format_significant(memory_unit.apply(memory), 3),
            memory_unit.label
        ),
    )
}

fn with_unit(number: String, label: &str) -> String {
    if label.is_empty() {
        number
    } else {
        format!("{number} {label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchtable_core::Distribution;
    use benchtable_units::select_unit_fixed;

    fn median(value: f64) -> Stat {
        Distribution::new(value).into()
    }

    #[test]
    fn test_metric_parse() {
        assert_eq!("median".parse::<Metric>().unwrap(), Metric::Median);
        assert_eq!("memory".parse::<Metric>().unwrap(), Metric::Memory);
        assert_eq!(
            "allocations".parse::<Metric>(),
            Err(TableError::UnknownMetric("allocations".to_string()))
        );
        assert!("time".parse::<Metric>().is_err());
    }

    #[test]
    fn test_metric_value_of() {
        let stat: Stat = Distribution::new(2.0).with_allocations(3.0, 64.0).into();
        assert_eq!(Metric::Median.value_of(&stat), Some(2.0));
        assert_eq!(Metric::Memory.value_of(&stat), Some(64.0));
        assert_eq!(Metric::Memory.value_of(&median(1.0)), None);
        assert_eq!(Metric::Median.value_of(&Stat::Scalar(1.0)), None);
        assert_eq!(Metric::Median.value_of(&Stat::Missing), None);
    }

    #[test]
    fn test_time_auto_unit() {
        assert_eq!(format_time(&median(0.0025), None), "2.5 ms");
        assert_eq!(format_time(&median(1.5e-8), None), "15 ns");
        assert_eq!(format_time(&median(7200.0), None), "2 h");
    }

    #[test]
    fn test_time_fixed_unit_matches_auto() {
        let ms = select_unit_fixed("ms").unwrap();
        assert_eq!(format_time(&median(0.0025), Some(ms)), "2.5 ms");
    }

    #[test]
    fn test_time_with_spread() {
        let stat: Stat = Distribution::new(0.0025).with_quartiles(0.0024, 0.0026).into();
        assert_eq!(format_time(&stat, None), "2.5 ± 0.2 ms");

        let inverted: Stat = Distribution::new(0.0025).with_quartiles(0.0026, 0.0024).into();
        assert_eq!(format_time(&inverted, None), "2.5 ± 0 ms");
    }

    #[test]
    fn test_time_scalar_uses_memory_units() {
        assert_eq!(format_time(&Stat::Scalar(2048.0), None), "2 KB");
        assert_eq!(format_time(&Stat::Scalar(12.0), None), "12 B");
    }

    #[test]
    fn test_time_missing_is_empty() {
        assert_eq!(format_time(&Stat::Missing, None), "");
    }

    #[test]
    fn test_memory_cells() {
        let stat: Stat = Distribution::new(1.0).with_allocations(12.0, 1536.0).into();
        assert_eq!(format_memory(&stat), "12 allocs: 1.5 KB");

        let big: Stat = Distribution::new(1.0)
            .with_allocations(2500.0, 3.0 * 1024.0 * 1024.0)
            .into();
        assert_eq!(format_memory(&big), "2.5 K allocs: 3 MB");
    }

    #[test]
    fn test_memory_requires_both_fields() {
        let mut dist = Distribution::new(1.0);
        dist.allocs = Some(3.0);
        assert_eq!(format_memory(&dist.into()), "");
        assert_eq!(format_memory(&median(1.0)), "");
        assert_eq!(format_memory(&Stat::Scalar(5.0)), "");
        assert_eq!(format_memory(&Stat::Missing), "");
    }

    #[test]
    fn test_time_to_load_ignores_fixed_unit() {
        let formatter = Formatter::for_metric(Metric::Median, Some(select_unit_fixed("h").unwrap()));
        let stat = median(0.5);

        assert_eq!(formatter.format(&stat, TIME_TO_LOAD), "500 ms");
        assert_eq!(formatter.format(&stat, "other"), "0.000139 h");
    }

    #[test]
    fn test_closure_formatter() {
        let custom = |stat: &Stat, row: &str| format!("{row}:{}", stat.is_missing());
        assert_eq!(custom.format(&Stat::Missing, "a"), "a:true");
    }
}
