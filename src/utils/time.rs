use std::time::Duration;

use chrono::NaiveDateTime;

use crate::catalog::orderer::VERSION_FORMAT;

/// Formats an elapsed run time, e.g. `"0.148s"`.
pub fn format_duration(elapsed: Duration) -> String {
    format!("{:.3}s", elapsed.as_millis() as f64 / 1000.0)
}

/// `20240101093000` -> `2024-01-01 09:30:00`, or the input unchanged when it
/// is not a version.
pub fn format_version(version: &str) -> String {
    NaiveDateTime::parse_from_str(version, VERSION_FORMAT)
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| version.to_string())
}

pub fn format_timestamp(ts: Option<NaiveDateTime>) -> String {
    ts.map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}
