use chrono::{SecondsFormat, Utc};

/// Returns the current UTC time as ISO-8601 with millisecond precision,
/// e.g. `2025-03-01T09:30:00.125Z`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
