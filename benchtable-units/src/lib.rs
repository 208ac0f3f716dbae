#![warn(missing_docs)]
//! Benchtable Units
//!
//! Picks human-friendly units for raw benchmark magnitudes and formats numbers
//! to a fixed count of significant digits:
//! - Time in seconds: ns, μs, ms, s, h
//! - Memory in bytes (base 1024): B, KB, MB, GB
//! - Allocation counts (base 1000): plain, K, M

mod format;
mod unit;

pub use format::format_significant;
pub use unit::{
    ALLOC_UNITS, Domain, MEMORY_UNITS, TIME_UNITS, Unit, UnitError, select_unit, select_unit_fixed,
};
