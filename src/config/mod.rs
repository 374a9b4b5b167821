//! Tunable game rules.
//!
//! Every field has a default matching the shipped game, so an empty TOML
//! document is a valid configuration:
//!
//! ```toml
//! rows = 6
//! level_lengths = [4, 5, 6, 7]
//! score_table = [100, 70, 50, 35, 25, 18]
//! hint_penalty = 25
//! advance_delay_ms = 1200
//!
//! [streak]
//! freeze_threshold = 7
//! hint_interval = 5
//! milestones = [3, 7, 14, 30, 50, 100]
//! ```

mod builder;
mod error;

pub use builder::GameConfigBuilder;
pub use error::{ConfigError, ConfigViolation};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use stillwater::validation::Validation;

/// Rules of the streak economy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakRules {
    /// Streak length that earns the month's freeze
    pub freeze_threshold: u32,
    /// A hint is earned every time the streak hits a multiple of this
    pub hint_interval: u32,
    /// Ascending streak lengths that trigger a one-time celebration
    pub milestones: Vec<u32>,
}

impl Default for StreakRules {
    fn default() -> Self {
        Self {
            freeze_threshold: 7,
            hint_interval: 5,
            milestones: vec![3, 7, 14, 30, 50, 100],
        }
    }
}

/// Full game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Attempts per puzzle
    pub rows: usize,
    /// Word length of each level, in play order
    pub level_lengths: Vec<usize>,
    /// Bonus for a win on attempt `i + 1`
    pub score_table: Vec<i64>,
    /// Score deducted for each hint used
    pub hint_penalty: i64,
    /// Pause between a resolved puzzle and the next one
    pub advance_delay_ms: u64,
    pub streak: StreakRules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            level_lengths: vec![4, 5, 6, 7],
            score_table: vec![100, 70, 50, 35, 25, 18],
            hint_penalty: 25,
            advance_delay_ms: 1200,
            streak: StreakRules::default(),
        }
    }
}

impl GameConfig {
    pub fn builder() -> GameConfigBuilder {
        GameConfigBuilder::new()
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(?path, levels = config.level_lengths.len(), "Loaded game config");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Check every rule, reporting all violations at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut checks = vec![
            rule(self.rows >= 1, ConfigViolation::NoRows),
            rule(!self.level_lengths.is_empty(), ConfigViolation::EmptyLadder),
            rule(!self.score_table.is_empty(), ConfigViolation::EmptyScoreTable),
            rule(self.streak.hint_interval >= 1, ConfigViolation::ZeroHintInterval),
            rule(
                self.streak.milestones.windows(2).all(|w| w[0] < w[1]),
                ConfigViolation::UnsortedMilestones,
            ),
        ];
        for (level, &len) in self.level_lengths.iter().enumerate() {
            checks.push(rule(len >= 1, ConfigViolation::ZeroLength { level: level + 1 }));
        }

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(violations) => Err(ConfigError::Invalid(violations)),
        }
    }

    pub fn level_count(&self) -> usize {
        self.level_lengths.len()
    }

    pub fn length_of_level(&self, level_index: usize) -> Option<usize> {
        self.level_lengths.get(level_index).copied()
    }

    /// Bonus for winning on `attempt` (1-based).
    ///
    /// Attempts past the end of the table earn its last entry; attempt 0
    /// counts as attempt 1.
    pub fn bonus_for(&self, attempt: usize) -> i64 {
        let idx = attempt.max(1).min(self.score_table.len()).saturating_sub(1);
        self.score_table.get(idx).copied().unwrap_or(0)
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }
}

fn rule(ok: bool, violation: ConfigViolation) -> Validation<(), Vec<ConfigViolation>> {
    if ok {
        Validation::Success(())
    } else {
        Validation::Failure(vec![violation])
    }
}
