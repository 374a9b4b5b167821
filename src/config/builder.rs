//! Fluent builder for game configurations.

use super::{ConfigError, GameConfig};

/// Builder starting from the default configuration.
///
/// # Example
///
/// ```
/// use wordscend::config::GameConfig;
///
/// let config = GameConfig::builder()
///     .rows(5)
///     .level_lengths([5, 6])
///     .hint_penalty(10)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.level_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GameConfigBuilder {
    config: GameConfig,
}

impl GameConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.config.rows = rows;
        self
    }

    pub fn level_lengths(mut self, lengths: impl IntoIterator<Item = usize>) -> Self {
        self.config.level_lengths = lengths.into_iter().collect();
        self
    }

    pub fn score_table(mut self, table: impl IntoIterator<Item = i64>) -> Self {
        self.config.score_table = table.into_iter().collect();
        self
    }

    pub fn hint_penalty(mut self, penalty: i64) -> Self {
        self.config.hint_penalty = penalty;
        self
    }

    pub fn advance_delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.advance_delay_ms = delay_ms;
        self
    }

    pub fn freeze_threshold(mut self, days: u32) -> Self {
        self.config.streak.freeze_threshold = days;
        self
    }

    pub fn hint_interval(mut self, days: u32) -> Self {
        self.config.streak.hint_interval = days;
        self
    }

    pub fn milestones(mut self, milestones: impl IntoIterator<Item = u32>) -> Self {
        self.config.streak.milestones = milestones.into_iter().collect();
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<GameConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigViolation;

    #[test]
    fn builder_overrides_defaults() {
        let config = GameConfigBuilder::new()
            .score_table([10, 5])
            .freeze_threshold(3)
            .milestones([2, 4])
            .advance_delay_ms(0)
            .build()
            .unwrap();

        assert_eq!(config.bonus_for(4), 5);
        assert_eq!(config.streak.freeze_threshold, 3);
        assert_eq!(config.streak.milestones, vec![2, 4]);
        assert_eq!(config.rows, 6);
    }

    #[test]
    fn builder_validates() {
        let err = GameConfigBuilder::new()
            .level_lengths([])
            .hint_interval(0)
            .build()
            .unwrap_err();

        match err {
            ConfigError::Invalid(violations) => {
                assert!(violations.contains(&ConfigViolation::EmptyLadder));
                assert!(violations.contains(&ConfigViolation::ZeroHintInterval));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
