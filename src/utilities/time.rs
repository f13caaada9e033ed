// File: src/utilities/time.rs
//
// Time-Point String Helpers
//
// On-chain time fields travel as ISO-8601 strings with millisecond
// precision and no timezone suffix ("2024-01-31T12:00:00.000"). These
// helpers parse and produce exactly that shape; a trailing 'Z' on input is
// tolerated and stripped.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::error::{HarnessError, Result};

/// Largest representable on-chain time point
pub const TIME_POINT_MAX: &str = "2106-02-07T06:28:15.000";

/// Smallest representable on-chain time point
pub const TIME_POINT_MIN: &str = "1970-01-01T00:00:00.000";

const TIME_POINT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

fn parse_time_point(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.strip_suffix('Z').unwrap_or(s);
    NaiveDateTime::parse_from_str(trimmed, TIME_POINT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|err| {
            HarnessError::runtime_unlocated(format!("cannot parse time point '{}': {}", s, err))
        })
}

/// Current UTC time as a time-point string.
pub fn current_time() -> String {
    Utc::now().format(TIME_POINT_FORMAT).to_string()
}

/// Add (or with a negative count, subtract) seconds to a time-point string.
pub fn add_seconds(time_point: &str, seconds: i64) -> Result<String> {
    let parsed = parse_time_point(time_point)?;
    let shifted = parsed + Duration::seconds(seconds);
    Ok(shifted.format(TIME_POINT_FORMAT).to_string())
}

/// Seconds since the epoch for a time-point string fetched from a contract.
pub fn epoch_secs(time_point: &str) -> Result<i64> {
    let parsed = parse_time_point(time_point)?;
    Ok(DateTime::<Utc>::from_naive_utc_and_offset(parsed, Utc).timestamp())
}
