//! Service date arithmetic.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};

/// The next Sunday strictly after `now`, in the local offset.
///
/// On a Sunday this is a week out, never today.
pub fn next_service_date(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    let today = now.with_timezone(&offset).date_naive();
    let days_ahead = match today.weekday().num_days_from_sunday() {
        0 => 7,
        d => 7 - d,
    };
    today + Duration::days(i64::from(days_ahead))
}

/// Long-form date as used in messages, e.g. "October 25, 2026".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
