//! Time utilities

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// The instant `days` whole days after `from`
pub fn days_from(from: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    from + Duration::days(days)
}

/// Render a timestamp as ISO 8601 in UTC with millisecond precision,
/// e.g. `2025-01-01T00:00:00.000Z`
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
