//! Settings for labels, units, trimming and default quantile intervals
//!
//! Settings are read from TOML. Every section is optional; anything left out
//! falls back to the built-in defaults.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::format::{DateLabels, TrimOptions, UnitNames};

/// Errors that can occur when loading or parsing settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Quantile interval {0} is outside [0, 1]")]
    InvalidInterval(f64),
}

/// Statistics defaults
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatsSettings {
    /// Quantiles reported when none are requested explicitly
    pub intervals: Vec<f64>,
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            intervals: vec![0.5, 0.9, 0.99],
        }
    }
}

/// Application settings
///
/// A missing section falls back to that section's own defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub labels: DateLabels,
    #[serde(default)]
    pub units: UnitNames,
    #[serde(default)]
    pub trim: TrimOptions,
    #[serde(default)]
    pub stats: StatsSettings,
}

/// The settings that apply when no file is given
pub const DEFAULT_SETTINGS: &str = r#"
[labels]
today = "Today"
yesterday = "Yesterday"

[units]
minute = "m"
hour = "h"
day = "d"

[trim]
max_length = 1024
ellipsis = false

[stats]
intervals = [0.5, 0.9, 0.99]
"#;

impl Default for Settings {
    fn default() -> Self {
        Self::from_str(DEFAULT_SETTINGS).expect("Default settings should be valid TOML")
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load settings from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        // Out-of-range intervals would be clamped silently; reject them here.
        match self
            .stats
            .intervals
            .iter()
            .find(|q| !(0.0..=1.0).contains(*q))
        {
            Some(q) => Err(SettingsError::InvalidInterval(*q)),
            None => Ok(()),
        }
    }

    /// Set the relative date labels
    pub fn with_labels(mut self, labels: DateLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Set the time unit names
    pub fn with_units(mut self, units: UnitNames) -> Self {
        self.units = units;
        self
    }

    /// Set the default quantile intervals
    pub fn with_intervals(mut self, intervals: Vec<f64>) -> Self {
        self.stats.intervals = intervals;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_document_matches_section_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.labels, DateLabels::default());
        assert_eq!(settings.units, UnitNames::default());
        assert_eq!(settings.trim, TrimOptions::default());
        assert_eq!(settings.stats, StatsSettings::default());
    }

    #[test]
    fn test_partial_settings_fall_back() {
        let toml_str = r#"
[units]
minute = "Minutes"
"#;
        let settings = Settings::from_str(toml_str).expect("Should parse");
        assert_eq!(settings.units.minute, "Minutes");
        assert_eq!(settings.units.hour, "h");
        assert_eq!(settings.labels.today, "Today");
        assert_eq!(settings.trim.max_length, 1024);
    }

    #[test]
    fn test_empty_settings() {
        let settings = Settings::from_str("").expect("Should parse");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_custom_intervals() {
        let settings = Settings::from_str("[stats]\nintervals = [0.25, 0.75]").expect("Should parse");
        assert_eq!(settings.stats.intervals, vec![0.25, 0.75]);
    }

    #[test]
    fn test_out_of_range_interval_rejected() {
        let result = Settings::from_str("[stats]\nintervals = [0.5, 1.5]");
        assert!(matches!(result, Err(SettingsError::InvalidInterval(q)) if q == 1.5));
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = Settings::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(SettingsError::ParseError(_))));
    }

    #[test]
    fn test_builder_pattern() {
        let settings = Settings::default()
            .with_intervals(vec![0.1])
            .with_labels(DateLabels {
                today: "Hoy".to_string(),
                yesterday: "Ayer".to_string(),
            })
            .with_units(UnitNames {
                minute: "min".to_string(),
                hour: "hr".to_string(),
                day: "day".to_string(),
            });
        assert_eq!(settings.stats.intervals, vec![0.1]);
        assert_eq!(settings.units.hour, "hr");
        assert_eq!(settings.labels.today, "Hoy");
    }
}
