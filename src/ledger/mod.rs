//! Cross-day player ledger.
//!
//! The ledger is an explicit value threaded through every operation:
//! today's score and level, the streak economy, and one snapshot per
//! puzzle length so an unfinished puzzle survives a reload. Persistence is
//! an explicit load/save against a [`LedgerStore`].

mod codec;
mod day;
mod error;
mod store;
mod streak;

pub use day::DayKey;
pub use error::LedgerError;
pub use store::{FileStore, LedgerStore, MemoryStore, StoreError};
pub use streak::{PlayOutcome, Streak};

use crate::checkpoint::{self, Snapshot};
use crate::config::GameConfig;
use crate::core::AttemptState;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Durable player record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    /// Day the score, level and snapshots belong to
    pub day: DayKey,
    /// Unclamped: hint penalties may push it below zero
    pub score: i64,
    pub level_index: usize,
    pub streak: Streak,
    pub progress_by_length: BTreeMap<usize, Snapshot>,
    /// Puzzle lengths a hint was spent on today
    pub hints_used: BTreeSet<usize>,
}

/// End-of-run summary for the end card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub day: DayKey,
    pub score: i64,
    pub streak_current: u32,
    pub streak_best: u32,
}

/// Where the run goes after a win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelAdvance {
    /// Another level remains
    Next { level_index: usize, length: usize },
    /// The last level was won; the day's run starts over
    RunComplete(RunSummary),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinOutcome {
    pub bonus: i64,
    pub score: i64,
    pub advance: LevelAdvance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintUse {
    pub penalty: i64,
    pub score: i64,
    pub hints_left: u32,
}

impl Ledger {
    /// Fresh ledger for `today`.
    pub fn new(today: DayKey, config: &GameConfig) -> Self {
        Self {
            day: today,
            score: 0,
            level_index: 0,
            streak: Streak::new(config.streak.milestones.clone()),
            progress_by_length: BTreeMap::new(),
            hints_used: BTreeSet::new(),
        }
    }

    /// Start a new day if `today` differs from the stored day.
    ///
    /// Score, level, snapshots and per-day flags reset; the streak block
    /// (counters, freezes, hints, earned sets) carries over.
    pub fn roll_over(&mut self, today: DayKey) -> bool {
        if self.day == today {
            return false;
        }
        tracing::info!(from = %self.day, to = %today, "Day rollover");
        self.day = today;
        self.score = 0;
        self.level_index = 0;
        self.streak.begin_day();
        self.progress_by_length.clear();
        self.hints_used.clear();
        true
    }

    /// Word length of the current level.
    pub fn current_length(&self, config: &GameConfig) -> Option<usize> {
        config.length_of_level(self.level_index)
    }

    /// Apply a win on `attempt` (1-based) of the current level.
    ///
    /// Adds the bonus, drops the finished puzzle's snapshot and moves to
    /// the next level. After the last level the run summary is returned and
    /// the day's run is reset (streak untouched).
    pub fn record_win(&mut self, attempt: usize, today: DayKey, config: &GameConfig) -> WinOutcome {
        let bonus = config.bonus_for(attempt);
        self.score = self.score.saturating_add(bonus);
        if let Some(length) = self.current_length(config) {
            self.clear_progress(length);
        }

        let advance = if self.level_index + 1 < config.level_count() {
            self.level_index += 1;
            LevelAdvance::Next {
                level_index: self.level_index,
                length: self.current_length(config).unwrap_or_default(),
            }
        } else {
            let summary = RunSummary {
                day: self.day,
                score: self.score,
                streak_current: self.streak.current,
                streak_best: self.streak.best,
            };
            tracing::info!(score = summary.score, streak = summary.streak_current, "Run complete");
            self.day = today;
            self.score = 0;
            self.level_index = 0;
            self.progress_by_length.clear();
            LevelAdvance::RunComplete(summary)
        };

        WinOutcome {
            bonus,
            score: self.score,
            advance,
        }
    }

    /// Apply a loss: the puzzle of `length` restarts from scratch.
    pub fn record_loss(&mut self, length: usize) {
        self.clear_progress(length);
    }

    /// Spend a banked hint on the puzzle of `length`.
    ///
    /// At most one hint per length per day. The penalty is subtracted
    /// without clamping.
    pub fn use_hint(&mut self, length: usize, config: &GameConfig) -> Result<HintUse, LedgerError> {
        if self.hints_used.contains(&length) {
            return Err(LedgerError::HintAlreadyUsed { length });
        }
        if !self.streak.spend_hint() {
            return Err(LedgerError::NoHintsAvailable);
        }
        self.hints_used.insert(length);
        self.score = self.score.saturating_sub(config.hint_penalty);

        Ok(HintUse {
            penalty: config.hint_penalty,
            score: self.score,
            hints_left: self.streak.hints_available,
        })
    }

    /// Live score adjustment from the caller. Zero deltas are ignored.
    pub fn add_score(&mut self, delta: i64) -> bool {
        if delta == 0 {
            return false;
        }
        self.score = self.score.saturating_add(delta);
        true
    }

    /// Jump to a 1-based level; out-of-range levels are ignored.
    pub fn override_level(&mut self, level: usize, config: &GameConfig) -> bool {
        if level == 0 || level > config.level_count() {
            return false;
        }
        self.level_index = level - 1;
        true
    }

    /// Replace everything, streak included, with a fresh ledger.
    pub fn reset(&mut self, today: DayKey, config: &GameConfig) {
        tracing::info!("Ledger reset");
        *self = Self::new(today, config);
    }

    pub fn save_progress(&mut self, length: usize, snapshot: Snapshot) {
        self.progress_by_length.insert(length, snapshot);
    }

    pub fn clear_progress(&mut self, length: usize) {
        self.progress_by_length.remove(&length);
    }

    /// Resume the puzzle of `length` if its snapshot matches; a stale or
    /// foreign snapshot is removed.
    pub fn restore_progress(
        &mut self,
        length: usize,
        answer: &str,
        today: DayKey,
    ) -> Option<AttemptState> {
        let stored = self.progress_by_length.get(&length)?;
        let restored = checkpoint::restore(stored, answer, length, today);
        if restored.is_none() {
            self.progress_by_length.remove(&length);
        }
        restored
    }

    /// Decode a persisted document leniently; see the `codec` rules.
    pub fn decode(document: &str, today: DayKey, config: &GameConfig) -> Result<Self, LedgerError> {
        codec::decode(document, today, config)
    }

    pub fn encode(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Read the ledger from `store` and roll it over to `today`.
    ///
    /// Never fails: a missing, unreadable or corrupt document yields a
    /// fresh ledger.
    pub fn load<S>(store: &S, today: DayKey, config: &GameConfig) -> Self
    where
        S: LedgerStore + ?Sized,
    {
        let mut ledger = match store.read() {
            Ok(Some(document)) => Self::decode(&document, today, config).unwrap_or_else(|err| {
                tracing::warn!(%err, "Discarding stored ledger");
                Self::new(today, config)
            }),
            Ok(None) => Self::new(today, config),
            Err(err) => {
                tracing::warn!(%err, "Failed to read stored ledger");
                Self::new(today, config)
            }
        };
        ledger.roll_over(today);
        ledger
    }

    pub fn save<S>(&self, store: &mut S) -> Result<(), LedgerError>
    where
        S: LedgerStore + ?Sized,
    {
        let document = self.encode()?;
        store.write(&document)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkpoint::snapshot;

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn rollover_resets_day_fields_only() {
        let config = config();
        let mut ledger = Ledger::new(day("2025-08-01"), &config);
        ledger.score = 120;
        ledger.level_index = 2;
        ledger.hints_used.insert(4);
        ledger.streak.current = 3;
        ledger.streak.best = 5;
        ledger.streak.marked_today = true;
        ledger.streak.hints_available = 1;
        let state = AttemptState::new(6, 4, "WORD").unwrap();
        ledger.save_progress(4, snapshot(&state, day("2025-08-01")));

        assert!(!ledger.roll_over(day("2025-08-01")));
        assert!(ledger.roll_over(day("2025-08-02")));

        assert_eq!(ledger.score, 0);
        assert_eq!(ledger.level_index, 0);
        assert!(ledger.progress_by_length.is_empty());
        assert!(ledger.hints_used.is_empty());
        assert!(!ledger.streak.marked_today);
        assert_eq!(ledger.streak.current, 3);
        assert_eq!(ledger.streak.best, 5);
        assert_eq!(ledger.streak.hints_available, 1);
    }

    #[test]
    fn win_advances_level_and_clears_snapshot() {
        let config = config();
        let today = day("2025-08-01");
        let mut ledger = Ledger::new(today, &config);
        let state = AttemptState::new(6, 4, "WORD").unwrap();
        ledger.save_progress(4, snapshot(&state, today));

        let outcome = ledger.record_win(2, today, &config);
        assert_eq!(outcome.bonus, 70);
        assert_eq!(ledger.score, 70);
        assert_eq!(
            outcome.advance,
            LevelAdvance::Next {
                level_index: 1,
                length: 5
            }
        );
        assert!(ledger.progress_by_length.is_empty());
    }

    #[test]
    fn last_level_win_completes_run() {
        let config = config();
        let today = day("2025-08-01");
        let mut ledger = Ledger::new(today, &config);
        ledger.level_index = 3;
        ledger.score = 200;
        ledger.streak.current = 2;
        ledger.streak.best = 4;

        let outcome = ledger.record_win(1, today, &config);
        match outcome.advance {
            LevelAdvance::RunComplete(summary) => {
                assert_eq!(summary.score, 300);
                assert_eq!(summary.streak_current, 2);
                assert_eq!(summary.streak_best, 4);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(ledger.score, 0);
        assert_eq!(ledger.level_index, 0);
        assert_eq!(ledger.streak.best, 4);
    }

    #[test]
    fn hint_costs_score_and_is_once_per_length() {
        let config = config();
        let mut ledger = Ledger::new(day("2025-08-01"), &config);
        assert!(matches!(
            ledger.use_hint(5, &config),
            Err(LedgerError::NoHintsAvailable)
        ));

        ledger.streak.hints_available = 2;
        let used = ledger.use_hint(5, &config).unwrap();
        assert_eq!(used.score, -25);
        assert_eq!(used.hints_left, 1);
        assert!(matches!(
            ledger.use_hint(5, &config),
            Err(LedgerError::HintAlreadyUsed { length: 5 })
        ));
        assert!(ledger.use_hint(6, &config).is_ok());
        assert_eq!(ledger.score, -50);
    }

    #[test]
    fn add_score_ignores_zero_and_allows_negative() {
        let mut ledger = Ledger::new(day("2025-08-01"), &config());
        assert!(!ledger.add_score(0));
        assert!(ledger.add_score(-15));
        assert_eq!(ledger.score, -15);
    }

    #[test]
    fn override_level_is_bounded() {
        let config = config();
        let mut ledger = Ledger::new(day("2025-08-01"), &config);
        assert!(ledger.override_level(3, &config));
        assert_eq!(ledger.level_index, 2);
        assert!(!ledger.override_level(0, &config));
        assert!(!ledger.override_level(5, &config));
        assert_eq!(ledger.level_index, 2);
    }

    #[test]
    fn restore_progress_drops_stale_snapshot() {
        let config = config();
        let yesterday = day("2025-08-01");
        let mut ledger = Ledger::new(yesterday, &config);
        let state = AttemptState::new(6, 4, "WORD").unwrap();
        ledger.save_progress(4, snapshot(&state, yesterday));

        assert!(ledger
            .restore_progress(4, "WORD", day("2025-08-02"))
            .is_none());
        assert!(ledger.progress_by_length.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let config = config();
        let today = day("2025-08-01");
        let mut ledger = Ledger::new(today, &config);
        ledger.score = 45;
        ledger.streak.mark_played_today(today, &config.streak);
        let state = AttemptState::new(6, 5, "CRANE").unwrap();
        ledger.save_progress(5, snapshot(&state, today));

        let mut store = MemoryStore::new();
        ledger.save(&mut store).unwrap();
        assert_eq!(Ledger::load(&store, today, &config), ledger);
    }

    #[test]
    fn load_falls_back_on_garbage() {
        let config = config();
        let today = day("2025-08-01");
        let store = MemoryStore::with_document("{{{");
        assert_eq!(Ledger::load(&store, today, &config), Ledger::new(today, &config));
    }

    #[test]
    fn load_rolls_over_stale_day() {
        let config = config();
        let mut ledger = Ledger::new(day("2025-08-01"), &config);
        ledger.score = 99;
        let mut store = MemoryStore::new();
        ledger.save(&mut store).unwrap();

        let loaded = Ledger::load(&store, day("2025-08-03"), &config);
        assert_eq!(loaded.day, day("2025-08-03"));
        assert_eq!(loaded.score, 0);
    }

    #[test]
    fn extreme_stored_counters_play_through_a_win() {
        let config = config();
        let document = serde_json::json!({
            "day": "2025-09-01",
            "score": i64::MAX,
            "levelIndex": 0,
            "streak": {
                "current": u32::MAX,
                "best": u32::MAX,
                "availableFreezes": u32::MAX,
                "hintsAvailable": u32::MAX,
                "lastPlayDay": "2025-08-31"
            }
        })
        .to_string();
        let today = day("2025-09-01");
        let mut ledger = Ledger::decode(&document, today, &config).unwrap();

        ledger.streak.mark_played_today(today, &config.streak);
        assert_eq!(ledger.streak.current, u32::MAX);
        assert_eq!(ledger.streak.available_freezes, u32::MAX);

        let outcome = ledger.record_win(1, today, &config);
        assert_eq!(outcome.score, i64::MAX);
        assert!(ledger.add_score(i64::MAX));
        assert_eq!(ledger.score, i64::MAX);

        assert!(ledger.add_score(i64::MIN));
        assert!(ledger.add_score(i64::MIN));
        assert_eq!(ledger.score, i64::MIN);
        let used = ledger.use_hint(5, &config).unwrap();
        assert_eq!(used.score, i64::MIN);
        assert_eq!(used.hints_left, u32::MAX - 1);
    }
}
