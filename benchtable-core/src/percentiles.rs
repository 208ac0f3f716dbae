//! Quartile Computation
//!
//! Median and interquartile bounds from raw samples, with linear interpolation
//! between nearest ranks.

/// Lower quartile, median and upper quartile of a sample set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    /// 25th percentile
    pub p25: f64,
    /// 50th percentile (median)
    pub p50: f64,
    /// 75th percentile
    pub p75: f64,
}

/// Compute a single percentile from samples that are already sorted ascending.
pub fn percentile_of_sorted(sorted: &[f64], percentile: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = percentile / 100.0 * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = (lower + 1).min(n - 1);
            let fraction = rank - lower as f64;

            sorted[lower] + fraction * (sorted[upper] - sorted[lower])
        }
    }
}

/// Compute the quartiles of `samples`. Returns `None` for an empty slice.
pub fn compute_quartiles(samples: &[f64]) -> Option<Quartiles> {
    if samples.is_empty() {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    Some(Quartiles {
        p25: percentile_of_sorted(&sorted, 25.0),
        p50: percentile_of_sorted(&sorted, 50.0),
        p75: percentile_of_sorted(&sorted, 75.0),
    })
}
