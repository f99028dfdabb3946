use chrono::{DateTime, Utc};

pub fn now_i64() -> i64 {
    Utc::now().timestamp()
}

/// RFC3339 rendering of a unix timestamp, for log lines.
pub fn to_rfc3339(unix_ts: i64) -> String {
    DateTime::from_timestamp(unix_ts, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| unix_ts.to_string())
}
