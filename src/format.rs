//! Display formatting helpers for the chat UI

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// Default maximum length used by [`TrimOptions`]
pub const DEFAULT_TRIM_LENGTH: usize = 1024;

/// Labels used for relative dates
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DateLabels {
    pub today: String,
    pub yesterday: String,
}

impl Default for DateLabels {
    fn default() -> Self {
        Self {
            today: "Today".to_string(),
            yesterday: "Yesterday".to_string(),
        }
    }
}

/// Display names for time units
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UnitNames {
    pub minute: String,
    pub hour: String,
    pub day: String,
}

impl Default for UnitNames {
    fn default() -> Self {
        Self {
            minute: "m".to_string(),
            hour: "h".to_string(),
            day: "d".to_string(),
        }
    }
}

/// A duration expressed in its largest sensible unit
#[derive(Debug, Clone, PartialEq)]
pub struct TimeUnit {
    /// Amount rounded to one decimal, `None` for an unknown or zero duration
    pub time: Option<f64>,
    pub unit: String,
}

/// Content trimming settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrimOptions {
    pub max_length: usize,
    pub ellipsis: bool,
}

impl Default for TrimOptions {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_TRIM_LENGTH,
            ellipsis: false,
        }
    }
}

impl TrimOptions {
    /// Trim content with these options
    pub fn apply(&self, content: &str) -> String {
        trim_content(content, self.max_length, self.ellipsis)
    }
}

fn with_remainder(head: String, amount: f64, unit: &str) -> String {
    if amount > 0.0 {
        format!("{} {} {}", head, amount, unit)
    } else {
        head
    }
}

/// Format a duration in seconds as `"<n> Day <n> Hr"`, `"<n> Min <n> Sec"`, ...
///
/// Only the two largest units are shown and a zero remainder is dropped.
pub fn format_time(seconds: f64) -> String {
    if (60.0..3600.0).contains(&seconds) {
        let minutes = (seconds / 60.0).floor();
        let secs = if minutes == 60.0 {
            0.0
        } else {
            (seconds % 60.0).floor()
        };
        return with_remainder(format!("{} Min", minutes), secs, "Sec");
    }

    if (3600.0..86400.0).contains(&seconds) {
        let hours = (seconds / 3600.0).floor();
        let minutes = if seconds % 3600.0 < 60.0 || hours == 24.0 {
            0.0
        } else {
            (seconds % 3600.0 / 60.0).floor()
        };
        return with_remainder(format!("{} Hr", hours), minutes, "Min");
    }

    if seconds >= 86400.0 {
        let days = (seconds / 86400.0).floor();
        // Close to a year the hour remainder is noise.
        let hours = if seconds % 86400.0 < 3600.0 || days >= 364.0 {
            0.0
        } else {
            (seconds % 86400.0 / 3600.0).floor()
        };
        return with_remainder(format!("{} Day", days), hours, "Hr");
    }

    format!("{} Sec", seconds.floor())
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Convert seconds to minutes, hours or days
pub fn seconds_to_time_unit(seconds: Option<f64>, names: &UnitNames) -> TimeUnit {
    let seconds = match seconds {
        Some(s) if s != 0.0 => s,
        _ => {
            return TimeUnit {
                time: None,
                unit: names.minute.clone(),
            }
        }
    };

    let (time, unit) = if seconds < 3600.0 {
        (seconds / 60.0, &names.minute)
    } else if seconds < 86400.0 {
        (seconds / 3600.0, &names.hour)
    } else {
        (seconds / 86400.0, &names.day)
    };

    TimeUnit {
        time: Some(round_tenth(time)),
        unit: unit.clone(),
    }
}

fn parse_day(date: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Label a date as today or yesterday relative to `today`
///
/// Any other date, and anything that does not parse, is returned as given.
pub fn format_date(date: &str, today: NaiveDate, labels: &DateLabels) -> String {
    match parse_day(date) {
        Some(day) if day == today => labels.today.clone(),
        Some(day) if Some(day) == today.pred_opt() => labels.yesterday.clone(),
        _ => date.to_string(),
    }
}

/// Truncate content to `max_length` characters
///
/// With `ellipsis` set, `...` is appended whether or not anything was cut.
pub fn trim_content(content: &str, max_length: usize, ellipsis: bool) -> String {
    let mut trimmed: String = content.chars().take(max_length).collect();
    if ellipsis {
        trimmed.push_str("...");
    }
    trimmed
}

/// Black or white text, whichever reads better on the background color
///
/// The background is a six digit hex color with an optional leading `#`.
/// Unreadable colors get white text.
pub fn contrasting_text_color(background: &str) -> &'static str {
    let color = background.replace('#', "");
    let channel = |range: std::ops::Range<usize>| {
        color
            .get(range)
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .map(f64::from)
    };

    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) if r * 0.299 + g * 0.587 + b * 0.114 > 186.0 => "#000000",
        _ => "#FFFFFF",
    }
}

/// Parse a loosely typed boolean such as `"TRUE"`, `"0"` or `"false"`
///
/// The lowercased candidate is read as JSON and judged by truthiness, so
/// `"1"` is true and `"null"` is false. Anything that is not JSON is false.
pub fn parse_boolean(candidate: &str) -> bool {
    match serde_json::from_str::<serde_json::Value>(&candidate.to_lowercase()) {
        Ok(serde_json::Value::Bool(b)) => b,
        Ok(serde_json::Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Ok(serde_json::Value::String(s)) => !s.is_empty(),
        Ok(serde_json::Value::Null) => false,
        Ok(_) => true,
        Err(_) => false,
    }
}
