//! Error types for quantile estimation

use thiserror::Error;

/// Errors that can occur when estimating quantiles
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantileError {
    /// No samples to estimate from
    #[error("cannot estimate a quantile of an empty sample set")]
    EmptySamples,

    /// The requested quantile is not a number
    #[error("invalid quantile {0}")]
    InvalidQuantile(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_samples_display() {
        assert!(QuantileError::EmptySamples.to_string().contains("empty"));
    }

    #[test]
    fn test_invalid_quantile_display() {
        assert_eq!(QuantileError::InvalidQuantile(f64::NAN).to_string(), "invalid quantile NaN");
    }
}
