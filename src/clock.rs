//! Wall-clock capture and end-time label formatting.
//!
//! All calendar math is done in UTC. The refresher stamps each bar's
//! end-time label with [`hhmm_utc`] and its tooltip with [`date_utc`],
//! both computed from a unix timestamp captured once per element.

use chrono::{DateTime, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current wall-clock time as whole seconds since the unix
/// epoch.
///
/// Clocks before the epoch collapse to `0` rather than panicking; the
/// derived values clamp anyway.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn utc(unix_secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(unix_secs, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Formats a unix timestamp as a zero-padded 24-hour `HH:MM` label in UTC.
///
/// The result is always exactly five characters.
///
/// ```rust
/// use taskstack_widgets::clock::hhmm_utc;
///
/// assert_eq!(hhmm_utc(0), "00:00");
/// assert_eq!(hhmm_utc(3 * 3600 + 7 * 60), "03:07");
/// ```
pub fn hhmm_utc(unix_secs: i64) -> String {
    utc(unix_secs).format("%H:%M").to_string()
}

/// Formats a unix timestamp as a zero-padded `YYYY-MM-DD` date in UTC.
///
/// ```rust
/// use taskstack_widgets::clock::date_utc;
///
/// assert_eq!(date_utc(0), "1970-01-01");
/// ```
pub fn date_utc(unix_secs: i64) -> String {
    utc(unix_secs).format("%Y-%m-%d").to_string()
}
