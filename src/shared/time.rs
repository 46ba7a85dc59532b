//! Timestamp formatting shared by HTTP and realtime payloads.

use chrono::{DateTime, SecondsFormat, Utc};

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T10:00:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time as [`iso_timestamp`].
pub fn now_iso() -> String {
    iso_timestamp(Utc::now())
}
