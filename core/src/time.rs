//! Time related utils.

use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Unix timestamp in whole seconds of the given time.
pub fn unix_seconds(t: DateTime) -> i64 {
    t.timestamp()
}

/// Build a datetime from unix seconds.
///
/// Returns `None` if the value is out of range.
pub fn from_unix_seconds(secs: i64) -> Option<DateTime> {
    DateTime::from_timestamp(secs, 0)
}
