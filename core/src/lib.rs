//! Core progression engine for Idle Resource Empire.
//!
//! An idle game core with no UI attached: a resource pool that produces
//! passively through owned upgrades, a ledger with geometric effect and
//! pricing curves, a session engine with offline catch-up, and
//! SQLite-backed save slots. The runner in `tools/` drives it headlessly.

pub mod accumulator;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod ledger;
pub mod offline;
pub mod state;
pub mod store;
pub mod types;

pub use config::EngineConfig;
pub use engine::{GameEngine, SessionPhase};
pub use error::{GameError, GameResult, PurchaseRejection};
pub use state::GameState;
pub use store::{MemStore, SaveStore, SqliteStore};
