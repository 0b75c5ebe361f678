//! Shared primitive types used across the progression core.

/// A wall-clock instant in epoch milliseconds. Every timestamp in the
/// persisted snapshot uses this unit.
pub type Millis = i64;

/// A catalog upgrade identifier. Stable, contiguous, starting at 1.
pub type UpgradeId = u32;

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> Millis {
    chrono::Utc::now().timestamp_millis()
}
