//! Wire timestamp helpers

use chrono::{DateTime, Utc};

/// Convert an instant to epoch milliseconds, the only time format the service accepts
pub fn to_timestamp(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

/// Current wall-clock time as epoch milliseconds
pub fn now_timestamp() -> i64 {
    to_timestamp(Utc::now())
}

/// Human readable elapsed time, used when logging finished items
pub fn format_elapsed(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let elapsed = end.signed_duration_since(start);
    let millis = elapsed.num_milliseconds().max(0);
    if millis < 1000 {
        format!("{millis}ms")
    } else {
        format!("{:.3}s", millis as f64 / 1000.0)
    }
}
