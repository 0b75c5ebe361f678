//! The persisted game state — full progression state to/from JSON.
//!
//! A `GameState` is the unit of persistence: serialized wholesale on
//! save, deserialized wholesale on load, reconciled against the wall
//! clock immediately after load. Wire field names are camelCase and
//! never change; fields added later must be optional with safe defaults
//! so older snapshots keep loading.

use crate::types::{Millis, UpgradeId};
use serde::{Deserialize, Serialize};

/// The resource pool and its derived production rate.
///
/// `amount` only ever decreases through a purchase debit. `per_second`
/// is derived from the upgrade ledger and recomputed after every
/// purchase — it is never set directly. `last_updated` marks the
/// instant `amount` was last reconciled to real time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub amount:       f64,
    pub per_second:   f64,
    pub last_updated: Millis,
}

/// One catalog entry plus its per-player purchase state.
///
/// `cost` is the current price of the next level and is repriced after
/// every purchase. `unlocked` and `level` are monotone: once an upgrade
/// is unlocked it never locks again, and levels only go up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upgrade {
    pub id:          UpgradeId,
    pub name:        String,
    pub description: String,
    pub cost:        f64,
    pub level:       u32,
    pub base_effect: f64,
    pub multiplier:  f64,
    pub unlocked:    bool,
}

/// Lifetime counters. Purely observational — gameplay never reads them.
///
/// `last_played_timestamp` was added after the first snapshots shipped,
/// so the loader treats its absence as "no prior session" and skips
/// time-played accrual for that gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_resources_earned:   f64,
    pub total_upgrades_purchased: u64,
    /// Accumulated play time in milliseconds.
    pub total_time_played:        Millis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_played_timestamp:    Option<Millis>,
}

/// The full progression state: resources, the ordered upgrade catalog
/// with purchase state, and lifetime stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub resources: Resource,
    pub upgrades:  Vec<Upgrade>,
    pub stats:     Stats,
}

impl GameState {
    /// A freshly seeded state: nothing earned, no levels, the catalog
    /// exactly as configured (first entry unlocked), both clocks at
    /// `now`.
    pub fn seed(catalog: Vec<Upgrade>, now: Millis) -> Self {
        Self {
            resources: Resource {
                amount:       0.0,
                per_second:   0.0,
                last_updated: now,
            },
            upgrades: catalog,
            stats: Stats {
                total_resources_earned:   0.0,
                total_upgrades_purchased: 0,
                total_time_played:        0,
                last_played_timestamp:    Some(now),
            },
        }
    }

    /// Look up an upgrade by its catalog id.
    pub fn upgrade(&self, id: UpgradeId) -> Option<&Upgrade> {
        self.upgrades.iter().find(|u| u.id == id)
    }
}
