use crate::engine::SessionPhase;
use crate::types::UpgradeId;
use thiserror::Error;

/// Why a purchase was turned down. Reported to the caller so the UI can
/// surface a message; engine state is unchanged either way.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PurchaseRejection {
    #[error("no upgrade with id {id}")]
    NotFound { id: UpgradeId },

    #[error("costs {needed}, only {available} available")]
    InsufficientFunds { needed: f64, available: f64 },
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Save store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Snapshot serialization error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Purchase rejected: {reason}")]
    PurchaseRejected { reason: PurchaseRejection },

    #[error("Cannot debit {requested}: only {available} available")]
    InsufficientResources { requested: f64, available: f64 },

    #[error("'{op}' is not valid in the {phase:?} phase")]
    PhaseViolation { op: &'static str, phase: SessionPhase },

    #[error("Invalid config: {reason}")]
    Config { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GameError {
    /// The rejection reason, when this error is a turned-down purchase.
    pub fn purchase_rejection(&self) -> Option<PurchaseRejection> {
        match self {
            GameError::PurchaseRejected { reason } => Some(*reason),
            _ => None,
        }
    }
}

pub type GameResult<T> = Result<T, GameError>;
