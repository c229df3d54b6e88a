//! Crate-level error type

use thiserror::Error;

use crate::settings::SettingsError;
use crate::stats::QuantileError;

/// Errors surfaced by loaders and the command-line front end
#[derive(Debug, Error)]
pub enum Error {
    /// Reading input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A conversation or contact record was not valid JSON
    #[error("invalid record: {0}")]
    Record(#[from] serde_json::Error),

    /// Settings could not be loaded
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Quantile estimation failed
    #[error("quantile error: {0}")]
    Quantile(#[from] QuantileError),

    /// A sample was not a number
    #[error("invalid sample '{0}'")]
    InvalidSample(String),
}
