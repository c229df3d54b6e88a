//! Quantile estimation over numeric samples
//!
//! Quantiles use linear interpolation between the closest ranks (the R-7
//! method). Sorting is done once per sample set; [`quantile_intervals`] and
//! [`SortedSamples`] answer several quantiles from a single sort.

mod error;
mod quantile;

pub use error::QuantileError;
pub use quantile::{
    clamp, quantile, quantile_intervals, quantile_of_sorted, sort_ascending, SortedSamples,
};
