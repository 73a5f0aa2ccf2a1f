// Utility functions
use chrono::{DateTime, Utc};

/// Share of `part` in `total`, in percent. Zero when `total` is zero.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / total as f64
}

/// Rounds to the given number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Whole days elapsed between `timestamp` and `now`.
pub fn age_in_days(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    now.signed_duration_since(timestamp).num_days()
}
