//! Human-readable formatting for resource amounts and play time.
//!
//! Used by the runner's status lines and summaries; the engine itself
//! never formats anything.

/// Compact notation for large amounts: `999`, `1.5K`, `2.25M`, `3.10B`.
///
/// Sub-thousand values print as whole numbers (floored). K keeps one
/// decimal, M and B keep two.
pub fn format_amount(n: f64) -> String {
    if n >= 1_000_000_000.0 {
        format!("{:.2}B", n / 1_000_000_000.0)
    } else if n >= 1_000_000.0 {
        format!("{:.2}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else {
        format!("{}", n.floor() as i64)
    }
}

/// `seconds` as `2h 5m 10s`, dropping leading zero units.
pub fn format_duration_secs(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as i64;
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    if h > 0 {
        format!("{h}h {m}m {s}s")
    } else if m > 0 {
        format!("{m}m {s}s")
    } else {
        format!("{s}s")
    }
}
