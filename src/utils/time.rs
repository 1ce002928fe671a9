//! Time utilities: grace-period parsing.

use chrono::Duration;

/// Parse a `"hours:minutes"` grace period.
///
/// Missing or non-numeric parts default to 0, so `"2"` means two hours
/// and `"junk"` collapses to a zero-length period. This mirrors how
/// operators actually fill the column.
pub fn parse_grace_period(s: &str) -> Duration {
    let mut parts = s.split(':');
    let hours = parts
        .next()
        .and_then(|p| p.trim().parse::<i64>().ok())
        .unwrap_or(0);
    let minutes = parts
        .next()
        .and_then(|p| p.trim().parse::<i64>().ok())
        .unwrap_or(0);

    Duration::hours(hours) + Duration::minutes(minutes)
}
