//! Wire clock helpers.
//!
//! The chat service stamps every envelope with Unix milliseconds; these
//! helpers produce and render that representation.

use chrono::{DateTime, Utc};

/// Current Unix timestamp in milliseconds (UTC).
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render a millisecond timestamp as a `HH:MM:SS` clock (UTC).
///
/// Out-of-range values fall back to the raw number rather than failing a
/// render over a bad frame.
pub fn format_clock(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| millis.to_string())
}
