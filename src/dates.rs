//! Calendar helpers for day-keyed forecasts

use chrono::{DateTime, Days, NaiveDate, Utc};

/// Date format used for every day key in the API
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// The next `n` calendar days as `YYYY-MM-DD`, starting with today (UTC)
#[must_use]
pub fn next_n_dates_utc(n: usize) -> Vec<String> {
    dates_from(Utc::now().date_naive(), n)
}

/// `n` consecutive calendar days starting at `start`
#[must_use]
pub fn dates_from(start: NaiveDate, n: usize) -> Vec<String> {
    (0..n as u64)
        .map_while(|offset| start.checked_add_days(Days::new(offset)))
        .map(|date| date.format(DAY_FORMAT).to_string())
        .collect()
}

/// UTC day key for a Unix timestamp in seconds
#[must_use]
pub fn utc_day_of(timestamp: i64) -> Option<String> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.format(DAY_FORMAT).to_string())
}
