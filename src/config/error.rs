//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// A single rule broken by a [`GameConfig`](super::GameConfig).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("rows must be at least 1")]
    NoRows,

    #[error("level ladder is empty")]
    EmptyLadder,

    #[error("level {level} has zero length")]
    ZeroLength { level: usize },

    #[error("score table is empty")]
    EmptyScoreTable,

    #[error("hint interval must be at least 1")]
    ZeroHintInterval,

    #[error("milestones must be strictly ascending")]
    UnsortedMilestones,
}

/// Errors that can occur while loading or building a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Every violated rule, not just the first
    #[error("Invalid config: {}", format_violations(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn format_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
