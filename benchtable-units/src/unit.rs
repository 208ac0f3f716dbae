//! Unit Selection
//!
//! Each measurement domain has an ordered table of units, smallest first.
//! Auto mode walks the table and keeps the largest unit that still scales the
//! biggest value to at least 1.

use thiserror::Error;

/// Errors raised while resolving a unit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// The requested unit token is not a recognized time unit
    #[error("Unknown unit: {0} (expected one of ns, μs, us, ms, s, h)")]
    UnknownUnit(String),
}

/// Kind of quantity being displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Durations measured in seconds
    Time,
    /// Byte counts
    Memory,
    /// Allocation counts
    Allocs,
}

impl Domain {
    /// Ordered unit table for this domain, smallest unit first
    pub fn units(self) -> &'static [Unit] {
        match self {
            Domain::Time => &TIME_UNITS,
            Domain::Memory => &MEMORY_UNITS,
            Domain::Allocs => &ALLOC_UNITS,
        }
    }
}

/// A display unit: raw values are multiplied by `scale` before printing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    /// Factor applied to a raw value
    pub scale: f64,
    /// Suffix printed after the scaled value (may be empty)
    pub label: &'static str,
}

impl Unit {
    const fn new(scale: f64, label: &'static str) -> Self {
        Self { scale, label }
    }

    /// Convert a raw value into this unit
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        value * self.scale
    }
}

/// Time units for values in seconds
pub const TIME_UNITS: [Unit; 5] = [
    Unit::new(1e9, "ns"),
    Unit::new(1e6, "μs"),
    Unit::new(1e3, "ms"),
    Unit::new(1.0, "s"),
    Unit::new(1.0 / 3600.0, "h"),
];

/// Memory units for byte counts
pub const MEMORY_UNITS: [Unit; 4] = [
    Unit::new(1.0, "B"),
    Unit::new(1.0 / 1024.0, "KB"),
    Unit::new(1.0 / (1024.0 * 1024.0), "MB"),
    Unit::new(1.0 / (1024.0 * 1024.0 * 1024.0), "GB"),
];

/// Units for allocation counts
pub const ALLOC_UNITS: [Unit; 3] = [
    Unit::new(1.0, ""),
    Unit::new(1e-3, "K"),
    Unit::new(1e-6, "M"),
];

/// Pick the largest unit that keeps the biggest magnitude in `values` at or
/// above 1.
///
/// An empty slice is treated as a single zero, which selects the smallest unit.
///
/// # Examples
///
/// ```ignore
/// # use benchtable_units::{Domain, select_unit};
/// let unit = select_unit(&[0.0025], Domain::Time);
/// assert_eq!(unit.label, "ms");
/// ```
pub fn select_unit(values: &[f64], domain: Domain) -> Unit {
    let max = values.iter().map(|v| v.abs()).fold(0.0_f64, f64::max);
    let units = domain.units();

    units
        .iter()
        .rev()
        .find(|unit| unit.apply(max) >= 1.0)
        .copied()
        .unwrap_or(units[0])
}

/// Look up a fixed time unit by name.
///
/// `us` is accepted as an ASCII alias for `μs`.
pub fn select_unit_fixed(name: &str) -> Result<Unit, UnitError> {
    let label = match name {
        "us" => "μs",
        other => other,
    };

    TIME_UNITS
        .iter()
        .find(|unit| unit.label == label)
        .copied()
        .ok_or_else(|| UnitError::UnknownUnit(name.to_string()))
}
