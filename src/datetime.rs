//! Timestamp display helpers.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Default display format.
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Placeholder for a missing timestamp.
pub const MISSING: &str = "-";

/// Format a UTC timestamp in the given timezone.
///
/// # Arguments
///
/// * `dt` - Timestamp in UTC, if the service sent one
/// * `timezone` - Timezone name (e.g., "Asia/Seoul", "UTC")
/// * `format` - Output format string (e.g., "%Y-%m-%d %H:%M")
///
/// # Returns
///
/// Formatted timestamp; UTC when the timezone is unknown, [`MISSING`] when
/// there is no timestamp.
pub fn format_timestamp(dt: Option<&DateTime<Utc>>, timezone: &str, format: &str) -> String {
    let Some(dt) = dt else {
        return MISSING.to_string();
    };
    match timezone.parse::<Tz>() {
        Ok(tz) => dt.with_timezone(&tz).format(format).to_string(),
        Err(_) => dt.format(format).to_string(),
    }
}

/// Format a UTC timestamp with [`DEFAULT_FORMAT`].
pub fn format_timestamp_default(dt: Option<&DateTime<Utc>>, timezone: &str) -> String {
    format_timestamp(dt, timezone, DEFAULT_FORMAT)
}
