//! Attempt error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that reject an operation on an [`AttemptState`](super::AttemptState).
///
/// Every variant leaves the puzzle untouched; the caller surfaces a
/// transient message and carries on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttemptError {
    /// Submit with fewer letters than the word length
    #[error("Row is incomplete ({filled}/{needed} letters)")]
    Incomplete { filled: usize, needed: usize },

    /// Membership oracle rejected the guess
    #[error("'{guess}' is not in the word list")]
    NotAllowed { guess: String },

    /// Mutation attempted after the puzzle was won or lost
    #[error("Puzzle is already finished")]
    AlreadyDone,

    /// No free cell left in the current row
    #[error("Row is already full")]
    RowFull,

    /// Nothing to erase in the current row
    #[error("Row is empty")]
    RowEmpty,

    /// Input is not a single A-Z letter
    #[error("'{0}' is not a letter")]
    InvalidLetter(char),

    /// Answer does not fit the board
    #[error("Answer '{answer}' must be {cols} letters A-Z")]
    InvalidAnswer { answer: String, cols: usize },

    /// Guess and answer lengths differ
    #[error("Length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

/// Machine-readable rejection reason carried by a
/// [`PuzzleResult`](super::PuzzleResult).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    Incomplete,
    NotAllowed,
    AlreadyDone,
    InvalidInput,
    /// The calendar day ended while the row was being typed
    DayChanged,
}

impl AttemptError {
    #[must_use]
    pub const fn reason(&self) -> RejectReason {
        match self {
            Self::Incomplete { .. } => RejectReason::Incomplete,
            Self::NotAllowed { .. } => RejectReason::NotAllowed,
            Self::AlreadyDone => RejectReason::AlreadyDone,
            Self::RowFull
            | Self::RowEmpty
            | Self::InvalidLetter(_)
            | Self::InvalidAnswer { .. }
            | Self::LengthMismatch { .. } => RejectReason::InvalidInput,
        }
    }
}
