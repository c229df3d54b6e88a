//! Sorted-sample quantiles with linear interpolation

use tracing::{debug, warn};

use super::error::QuantileError;

/// Sort samples ascending into a new vector, leaving the input untouched
pub fn sort_ascending(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Clamp a value between a minimum and maximum
pub fn clamp<T: PartialOrd>(min: T, max: T, value: T) -> T {
    if value < min {
        return min;
    }
    if value > max {
        return max;
    }
    value
}

/// Quantile of samples already sorted in ascending order
///
/// `q` is clamped to `[0, 1]`. The result interpolates linearly between the
/// two samples around rank `(n - 1) * q`.
pub fn quantile_of_sorted(sorted: &[f64], q: f64) -> Result<f64, QuantileError> {
    if sorted.is_empty() {
        warn!("quantile requested for an empty sample set");
        return Err(QuantileError::EmptySamples);
    }
    if q.is_nan() {
        return Err(QuantileError::InvalidQuantile(q));
    }

    let q = clamp(0.0, 1.0, q);
    let pos = (sorted.len() - 1) as f64 * q;
    let base = pos.floor() as usize;
    let rest = pos - base as f64;

    // An integral position makes `rest` zero, so interpolation is a no-op.
    match sorted.get(base + 1) {
        Some(next) => Ok(sorted[base] + rest * (next - sorted[base])),
        None => Ok(sorted[base]),
    }
}

/// Quantile of unsorted samples
pub fn quantile(samples: &[f64], q: f64) -> Result<f64, QuantileError> {
    quantile_of_sorted(&sort_ascending(samples), q)
}

/// Quantiles for several intervals from a single sort
///
/// Results follow the order of `intervals`. No intervals means no results,
/// even for an empty sample set.
pub fn quantile_intervals(samples: &[f64], intervals: &[f64]) -> Result<Vec<f64>, QuantileError> {
    SortedSamples::new(samples).quantiles(intervals)
}

/// A sample set sorted once for repeated quantile queries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortedSamples {
    values: Vec<f64>,
}

impl SortedSamples {
    /// Sort a copy of the samples
    pub fn new(samples: &[f64]) -> Self {
        Self {
            values: sort_ascending(samples),
        }
    }

    /// Quantile at `q`
    pub fn quantile(&self, q: f64) -> Result<f64, QuantileError> {
        quantile_of_sorted(&self.values, q)
    }

    /// Quantiles for each interval, in order
    pub fn quantiles(&self, intervals: &[f64]) -> Result<Vec<f64>, QuantileError> {
        debug!(
            samples = self.values.len(),
            intervals = intervals.len(),
            "computing quantile intervals"
        );
        intervals.iter().map(|&q| self.quantile(q)).collect()
    }

    pub fn min(&self) -> Option<f64> {
        self.values.first().copied()
    }

    pub fn max(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The sorted samples
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl From<Vec<f64>> for SortedSamples {
    fn from(mut values: Vec<f64>) -> Self {
        values.sort_by(f64::total_cmp);
        Self { values }
    }
}
