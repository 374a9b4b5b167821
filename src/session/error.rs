//! Session error types.

use crate::config::ConfigError;
use crate::core::AttemptError;
use crate::ledger::LedgerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No answer candidates for {length}-letter puzzles")]
    NoCandidates { length: usize },

    #[error("Level {level_index} is not on the ladder")]
    NoSuchLevel { level_index: usize },

    #[error("Every letter is already revealed")]
    NothingToReveal,

    #[error(transparent)]
    Attempt(#[from] AttemptError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
