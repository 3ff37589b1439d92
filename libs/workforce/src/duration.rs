//! Human-readable worked-time strings

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 3_600_000;

/// Format a millisecond interval as `"{h}h {m}m"` or `"{m} minutes"`
///
/// Both parts are floored, never rounded up. Negative intervals are treated
/// as zero.
///
/// ```rust
/// use workforce::duration::format_duration;
///
/// assert_eq!(format_duration(3_599_999), "59 minutes");
/// assert_eq!(format_duration(3_600_000), "1h 0m");
/// ```
pub fn format_duration(ms: i64) -> String {
    let ms = ms.max(0);
    let hours = ms / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes} minutes")
    }
}
