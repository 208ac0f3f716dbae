//! Per-benchmark Statistics
//!
//! The JSON shape written by benchmark runners is one of:
//! - an object with `"median"` and optionally `"25"`, `"75"`, `"allocs"`, `"memory"`
//! - a bare number
//! - `null` when the benchmark produced no value

use crate::percentiles::compute_quartiles;
use serde::{Deserialize, Serialize};

/// Measurement record for one (revision, benchmark) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stat {
    /// Median with optional quartiles and allocation counts
    Distribution(Distribution),
    /// A single bare value
    Scalar(f64),
    /// The benchmark ran but produced nothing for this metric
    Missing,
}

/// Summary of a measured distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    /// Median, in seconds for timings
    pub median: f64,
    /// Lower quartile, same unit as `median`
    #[serde(rename = "25", default, skip_serializing_if = "Option::is_none")]
    pub p25: Option<f64>,
    /// Upper quartile, same unit as `median`
    #[serde(rename = "75", default, skip_serializing_if = "Option::is_none")]
    pub p75: Option<f64>,
    /// Number of allocations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocs: Option<f64>,
    /// Bytes allocated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<f64>,
}

impl Distribution {
    /// Distribution with only a median
    pub fn new(median: f64) -> Self {
        Self {
            median,
            p25: None,
            p75: None,
            allocs: None,
            memory: None,
        }
    }

    /// Attach quartile bounds
    pub fn with_quartiles(mut self, p25: f64, p75: f64) -> Self {
        self.p25 = Some(p25);
        self.p75 = Some(p75);
        self
    }

    /// Attach allocation count and allocated bytes
    pub fn with_allocations(mut self, allocs: f64, memory: f64) -> Self {
        self.allocs = Some(allocs);
        self.memory = Some(memory);
        self
    }

    /// Both quartile bounds, if present
    pub fn quartiles(&self) -> Option<(f64, f64)> {
        Some((self.p25?, self.p75?))
    }

    /// Interquartile spread, clamped at zero so it never reads as negative
    pub fn spread(&self) -> Option<f64> {
        self.quartiles().map(|(p25, p75)| (p75 - p25).max(0.0))
    }
}

impl Stat {
    /// Summarize raw samples into median and quartiles.
    ///
    /// No samples means nothing to report, so the result is [`Stat::Missing`].
    pub fn from_samples(samples: &[f64]) -> Self {
        match compute_quartiles(samples) {
            Some(q) => Stat::Distribution(Distribution::new(q.p50).with_quartiles(q.p25, q.p75)),
            None => Stat::Missing,
        }
    }

    /// The distribution, when this stat has one
    pub fn as_distribution(&self) -> Option<&Distribution> {
        match self {
            Stat::Distribution(dist) => Some(dist),
            Stat::Scalar(_) | Stat::Missing => None,
        }
    }

    /// Whether this stat carries no value
    pub fn is_missing(&self) -> bool {
        matches!(self, Stat::Missing)
    }
}

impl From<Distribution> for Stat {
    fn from(dist: Distribution) -> Self {
        Stat::Distribution(dist)
    }
}

impl From<f64> for Stat {
    fn from(value: f64) -> Self {
        Stat::Scalar(value)
    }
}
