//! Engine configuration — tuning knobs plus the upgrade catalog.
//!
//! The compiled-in default catalog matches the shipped game. Deployments
//! can swap in a JSON catalog via `load_catalog`. `validate` runs once at
//! engine construction; after it passes, unlock adjacency and the pricing
//! math can trust the catalog shape.

use crate::error::{GameError, GameResult};
use crate::offline::DEFAULT_OFFLINE_CAP_SECS;
use crate::state::Upgrade;
use crate::types::{Millis, UpgradeId};
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Save slot this engine reads and writes.
    pub slot: String,
    /// Resources credited per manual collection.
    pub manual_collect_amount: f64,
    /// Wall-clock gap between autosaves.
    pub autosave_interval_ms: Millis,
    /// Ceiling on credited offline time, in seconds.
    pub offline_cap_secs: f64,
    /// Catalog used to seed new saves, in unlock order.
    pub catalog: Vec<Upgrade>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            slot:                  "default".to_string(),
            manual_collect_amount: 1.0,
            autosave_interval_ms:  60_000,
            offline_cap_secs:      DEFAULT_OFFLINE_CAP_SECS,
            catalog:               default_catalog(),
        }
    }
}

impl EngineConfig {
    /// Check the knobs and the catalog invariants. Called once by
    /// `GameEngine::new`; a config that passes never fails later unlock
    /// or pricing steps.
    pub fn validate(&self) -> GameResult<()> {
        if self.manual_collect_amount <= 0.0 {
            return Err(invalid(format!(
                "manual collect amount must be positive, got {}",
                self.manual_collect_amount
            )));
        }
        if self.autosave_interval_ms <= 0 {
            return Err(invalid(format!(
                "autosave interval must be positive, got {}ms",
                self.autosave_interval_ms
            )));
        }
        if self.offline_cap_secs <= 0.0 {
            return Err(invalid(format!(
                "offline cap must be positive, got {}s",
                self.offline_cap_secs
            )));
        }
        if self.catalog.is_empty() {
            return Err(invalid("catalog has no upgrades".to_string()));
        }
        for (i, u) in self.catalog.iter().enumerate() {
            // Unlocking works by id adjacency, so ids must run 1..=N
            // with no gaps.
            let expected = i as UpgradeId + 1;
            if u.id != expected {
                return Err(invalid(format!(
                    "catalog ids must run 1..{} in order, position {} has id {}",
                    self.catalog.len(),
                    i,
                    u.id
                )));
            }
            if u.cost <= 0.0 {
                return Err(invalid(format!("upgrade {} has non-positive cost {}", u.id, u.cost)));
            }
            if u.base_effect <= 0.0 {
                return Err(invalid(format!(
                    "upgrade {} has non-positive base effect {}",
                    u.id, u.base_effect
                )));
            }
            if u.multiplier <= 1.0 {
                return Err(invalid(format!(
                    "upgrade {} needs multiplier > 1, got {}",
                    u.id, u.multiplier
                )));
            }
            if u.level != 0 {
                return Err(invalid(format!(
                    "upgrade {} must start at level 0, got {}",
                    u.id, u.level
                )));
            }
        }
        if !self.catalog[0].unlocked {
            return Err(invalid("first upgrade must start unlocked".to_string()));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> GameError {
    GameError::Config { reason }
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    upgrades: Vec<Upgrade>,
}

/// Load an upgrade catalog from a `{"upgrades": [...]}` JSON file.
/// Entries use the same camelCase field names as saved snapshots.
pub fn load_catalog(path: &str) -> anyhow::Result<Vec<Upgrade>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
    let file: CatalogFile = serde_json::from_str(&content)?;
    Ok(file.upgrades)
}

/// The shipped five-tier catalog. Only the Basic Collector starts
/// unlocked; each purchase unlocks the next tier.
pub fn default_catalog() -> Vec<Upgrade> {
    vec![
        Upgrade {
            id:          1,
            name:        "Basic Collector".to_string(),
            description: "Enhances your resource collection rate".to_string(),
            cost:        10.0,
            level:       0,
            base_effect: 0.5,
            multiplier:  1.5,
            unlocked:    true,
        },
        Upgrade {
            id:          2,
            name:        "Automated Harvester".to_string(),
            description: "Automatically harvests resources for you".to_string(),
            cost:        50.0,
            level:       0,
            base_effect: 2.0,
            multiplier:  1.6,
            unlocked:    false,
        },
        Upgrade {
            id:          3,
            name:        "Resource Amplifier".to_string(),
            description: "Amplifies the value of collected resources".to_string(),
            cost:        250.0,
            level:       0,
            base_effect: 5.0,
            multiplier:  1.7,
            unlocked:    false,
        },
        Upgrade {
            id:          4,
            name:        "Quantum Extractor".to_string(),
            description: "Extracts resources from parallel dimensions".to_string(),
            cost:        1000.0,
            level:       0,
            base_effect: 15.0,
            multiplier:  1.8,
            unlocked:    false,
        },
        Upgrade {
            id:          5,
            name:        "Galactic Network".to_string(),
            description: "Collects resources from throughout the galaxy".to_string(),
            cost:        5000.0,
            level:       0,
            base_effect: 50.0,
            multiplier:  2.0,
            unlocked:    false,
        },
    ]
}
