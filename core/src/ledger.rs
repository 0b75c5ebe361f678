//! Upgrade ledger — pricing, production math, and the purchase rules.
//!
//! All progression math lives here so the engine and the tests agree on
//! a single source of truth. The two governing curves:
//!
//! - effect of one upgrade at level L: `base_effect * multiplier^(L-1)`
//!   (level 0 contributes nothing)
//! - price after a purchase: `floor(cost * sqrt(multiplier))`
//!
//! The production rate is never patched incrementally: it is always
//! recomputed by summing every upgrade's current effect.

use crate::error::PurchaseRejection;
use crate::state::Upgrade;
use crate::types::UpgradeId;

/// Outcome of a successful purchase, for receipts and logging.
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    /// Resources debited (the price before repricing).
    pub debited:   f64,
    /// The upgrade's level after the purchase.
    pub new_level: u32,
    /// The repriced cost of the next level.
    pub new_cost:  f64,
    /// Id of the upgrade this purchase newly unlocked, if any.
    pub unlocked:  Option<UpgradeId>,
}

/// Production contributed by `upgrade` if it were at `level`.
pub fn effect_at(upgrade: &Upgrade, level: u32) -> f64 {
    if level == 0 {
        return 0.0;
    }
    upgrade.base_effect * upgrade.multiplier.powi(level as i32 - 1)
}

/// Total production rate across the whole catalog, in resources/second.
pub fn total_rate(upgrades: &[Upgrade]) -> f64 {
    upgrades.iter().map(|u| effect_at(u, u.level)).sum()
}

/// Price of the level after one bought at `current_cost`.
///
/// The growth factor is `sqrt(multiplier)`, not the multiplier itself,
/// so prices rise slower than effects. Floored to whole numbers.
pub fn next_cost(current_cost: f64, multiplier: f64) -> f64 {
    (current_cost * multiplier.sqrt()).floor()
}

/// Apply one purchase of `id` against a balance of `available`.
///
/// On success this raises the level, reprices the upgrade, and unlocks
/// the next catalog entry by id adjacency (at most once). The caller
/// debits `Purchase::debited` and recomputes the production rate. On
/// rejection the slice is untouched.
///
/// Buying a still-locked upgrade is allowed; the lock flag only gates
/// what a front end shows.
pub fn purchase(
    upgrades: &mut [Upgrade],
    id: UpgradeId,
    available: f64,
) -> Result<Purchase, PurchaseRejection> {
    let idx = upgrades
        .iter()
        .position(|u| u.id == id)
        .ok_or(PurchaseRejection::NotFound { id })?;

    let price = upgrades[idx].cost;
    if available < price {
        return Err(PurchaseRejection::InsufficientFunds { needed: price, available });
    }

    let upgrade = &mut upgrades[idx];
    upgrade.level += 1;
    upgrade.cost = next_cost(price, upgrade.multiplier);
    let new_level = upgrade.level;
    let new_cost = upgrade.cost;

    let unlocked = unlock(upgrades, id + 1);

    Ok(Purchase { debited: price, new_level, new_cost, unlocked })
}

/// The next upgrade a player has yet to unlock, in catalog order.
pub fn next_locked(upgrades: &[Upgrade]) -> Option<&Upgrade> {
    upgrades.iter().find(|u| !u.unlocked)
}

/// Mark `id` unlocked. Returns the id only on a fresh unlock; an
/// already-unlocked or missing entry is a no-op.
fn unlock(upgrades: &mut [Upgrade], id: UpgradeId) -> Option<UpgradeId> {
    let next = upgrades.iter_mut().find(|u| u.id == id)?;
    if next.unlocked {
        None
    } else {
        next.unlocked = true;
        Some(id)
    }
}
