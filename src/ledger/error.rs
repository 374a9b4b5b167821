//! Ledger error types.

use super::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Stored document failed shape validation
    #[error("Corrupt persisted ledger: {0}")]
    CorruptPersisted(String),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No hints available")]
    NoHintsAvailable,

    #[error("A hint was already used for the {length}-letter puzzle today")]
    HintAlreadyUsed { length: usize },
}
