//! Time helpers
//!
//! Dates are converted to Unix millis (UTC) at the API layer; storage only
//! sees `i64` millis.

use chrono::{DateTime, NaiveDate, Utc};

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::invalid_input(field, format!("Invalid date format: {date} (expected YYYY-MM-DD)"))
    })
}

/// Start of day (00:00:00 UTC) in Unix millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}

/// Start of the next day in Unix millis; callers compare with `< end`
pub fn day_end_millis(date: NaiveDate) -> i64 {
    day_start_millis(date.succ_opt().unwrap_or(date))
}

/// `YYYYMMDD` stamp of a Unix millis timestamp
pub fn date_stamp(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .format("%Y%m%d")
        .to_string()
}
