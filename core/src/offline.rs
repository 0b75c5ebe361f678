//! Offline catch-up — credit for the time a player was away.
//!
//! Runs exactly once per session resume, before the first tick. The
//! credited window is capped so a long absence (or a forged clock)
//! cannot mint unbounded resources; time beyond the cap earns nothing.

use crate::types::Millis;

/// Ceiling on the credited away time, in seconds (24 hours).
pub const DEFAULT_OFFLINE_CAP_SECS: f64 = 86_400.0;

/// Report of one offline catch-up: how long the player was away, how
/// much of that window was credited, and what it earned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfflineEarnings {
    pub offline_secs:  f64,
    pub credited_secs: f64,
    pub earned:        f64,
}

/// Earnings for an away gap of `offline_ms` at `per_second`, credited
/// up to `cap_secs`. Negative gaps clamp to zero, same as live ticks.
pub fn compute(per_second: f64, offline_ms: Millis, cap_secs: f64) -> OfflineEarnings {
    let offline_secs = offline_ms.max(0) as f64 / 1000.0;
    let credited_secs = offline_secs.min(cap_secs);
    OfflineEarnings {
        offline_secs,
        credited_secs,
        earned: per_second * credited_secs,
    }
}
