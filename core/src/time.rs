//! Time related utils.

use chrono::Utc;

/// DateTime in UTC.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a new DateTime with the current UTC time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Unix timestamp of `t` in whole seconds.
pub fn unix_seconds(t: DateTime) -> i64 {
    t.timestamp()
}

/// Unix timestamp of `t` in milliseconds.
pub fn unix_millis(t: DateTime) -> i64 {
    t.timestamp_millis()
}
