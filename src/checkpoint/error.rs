//! Snapshot error types.

use thiserror::Error;

/// Identity field of a snapshot that disagrees with the live puzzle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnapshotMismatch {
    #[error("day {stored} != {expected}")]
    Day { stored: String, expected: String },

    #[error("answer differs")]
    Answer,

    #[error("cols {stored} != {expected}")]
    Cols { stored: usize, expected: usize },
}

/// Errors that can occur while decoding or restoring a snapshot
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Stored document does not have the snapshot shape
    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),

    /// Snapshot was written by a newer format
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot belongs to another puzzle
    #[error("Snapshot does not match the live puzzle: {0:?}")]
    Mismatch(Vec<SnapshotMismatch>),
}

impl From<serde_json::Error> for CheckpointError {
    fn from(err: serde_json::Error) -> Self {
        Self::Corrupt(err.to_string())
    }
}
