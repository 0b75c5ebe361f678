//! Resource pool arithmetic — the only code that credits or debits.
//!
//! `tick` is the passive-income path and owns the `last_updated` clock:
//! every call stamps it to `now`, even when no time elapsed, so the next
//! call always measures from the most recent observation. Clock gaps
//! that come out negative (host clock stepped backwards) clamp to zero
//! instead of revoking resources.

use crate::error::{GameError, GameResult};
use crate::state::Resource;
use crate::types::Millis;

/// Credit passive income for the wall time since the last reconciliation.
///
/// Returns the amount earned. `last_updated` is stamped to `now`
/// unconditionally, including on zero or negative gaps.
pub fn tick(resource: &mut Resource, now: Millis) -> f64 {
    let elapsed_ms = (now - resource.last_updated).max(0);
    let earned = resource.per_second * (elapsed_ms as f64 / 1000.0);
    resource.amount += earned;
    resource.last_updated = now;
    earned
}

/// Credit `amount` resources outside the passive-income path (manual
/// collection, offline catch-up).
pub fn add(resource: &mut Resource, amount: f64) {
    assert!(amount > 0.0, "credit must be positive, got {amount}");
    resource.amount += amount;
}

/// Debit `amount` resources, or fail without touching the pool.
pub fn debit(resource: &mut Resource, amount: f64) -> GameResult<()> {
    if amount > resource.amount {
        return Err(GameError::InsufficientResources {
            requested: amount,
            available: resource.amount,
        });
    }
    resource.amount -= amount;
    Ok(())
}
