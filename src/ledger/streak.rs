//! Play streak with its freeze and hint economy.

use super::day::DayKey;
use crate::config::StreakRules;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Cross-day streak record.
///
/// `current <= best` always holds, and each earned month, freeze day and
/// hint day is recorded at most once (they are sets).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub current: u32,
    pub best: u32,
    pub last_play_day: Option<DayKey>,
    pub marked_today: bool,
    pub available_freezes: u32,
    /// Months (`YYYY-MM`) in which a freeze was already earned
    pub earned_months: BTreeSet<String>,
    pub used_freeze_days: BTreeSet<DayKey>,
    /// Ascending celebration thresholds
    pub milestones: Vec<u32>,
    pub last_milestone_shown: u32,
    pub hints_available: u32,
    pub hint_earned_days: BTreeSet<DayKey>,
    pub toast_shown_day: Option<DayKey>,
}

/// What a call to [`Streak::mark_played_today`] changed.
///
/// Purely informational: the caller picks toast text, sounds and
/// animations from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOutcome {
    pub changed: bool,
    pub used_freeze: bool,
    pub earned_freeze: bool,
    pub new_best: bool,
    pub milestone: Option<u32>,
    pub earned_hint: bool,
    pub show_toast: bool,
}

impl Default for Streak {
    fn default() -> Self {
        Self::new(StreakRules::default().milestones)
    }
}

impl Streak {
    pub fn new(milestones: Vec<u32>) -> Self {
        Self {
            current: 0,
            best: 0,
            last_play_day: None,
            marked_today: false,
            available_freezes: 0,
            earned_months: BTreeSet::new(),
            used_freeze_days: BTreeSet::new(),
            milestones,
            last_milestone_shown: 0,
            hints_available: 0,
            hint_earned_days: BTreeSet::new(),
            toast_shown_day: None,
        }
    }

    /// Count `today` as played.
    ///
    /// Idempotent per day: once today is marked, further calls return
    /// `changed: false` and touch nothing. A play the day after the last
    /// one extends the streak; a single missed day is bridged by a banked
    /// freeze; anything else restarts the streak at 1.
    ///
    /// # Examples
    /// ```
    /// use wordscend::config::StreakRules;
    /// use wordscend::ledger::{DayKey, Streak};
    ///
    /// let rules = StreakRules::default();
    /// let mut streak = Streak::default();
    /// let monday = DayKey::from_ymd(2025, 6, 2).unwrap();
    ///
    /// assert!(streak.mark_played_today(monday, &rules).changed);
    /// assert!(!streak.mark_played_today(monday, &rules).changed);
    /// streak.mark_played_today(monday.succ(), &rules);
    /// assert_eq!(streak.current, 2);
    /// ```
    pub fn mark_played_today(&mut self, today: DayKey, rules: &StreakRules) -> PlayOutcome {
        if self.marked_today && self.last_play_day == Some(today) {
            return PlayOutcome::default();
        }

        let gap = self.last_play_day.map(|last| last.days_until(today));

        // Same day with the flag lost, or a clock that went backwards: mark
        // without streak arithmetic and never move last_play_day back.
        if gap.is_some_and(|g| g <= 0) {
            self.marked_today = true;
            return PlayOutcome {
                changed: true,
                show_toast: self.take_toast(today),
                ..PlayOutcome::default()
            };
        }

        let mut outcome = PlayOutcome {
            changed: true,
            ..PlayOutcome::default()
        };

        match gap {
            Some(1) => self.current = self.current.saturating_add(1),
            Some(2) if self.available_freezes > 0 => {
                self.available_freezes -= 1;
                self.used_freeze_days.insert(today);
                self.current = self.current.saturating_add(1);
                outcome.used_freeze = true;
                tracing::info!(%today, left = self.available_freezes, "Freeze bridged a missed day");
            }
            _ => self.current = 1,
        }

        if self.current > self.best {
            self.best = self.current;
            outcome.new_best = true;
        }

        if self.current >= rules.freeze_threshold && self.earned_months.insert(today.month_key()) {
            self.available_freezes = self.available_freezes.saturating_add(1);
            outcome.earned_freeze = true;
            tracing::info!(streak = self.current, "Earned a streak freeze");
        }

        if rules.hint_interval > 0
            && self.current > 0
            && self.current % rules.hint_interval == 0
            && self.hint_earned_days.insert(today)
        {
            self.hints_available = self.hints_available.saturating_add(1);
            outcome.earned_hint = true;
            tracing::info!(streak = self.current, "Earned a hint");
        }

        outcome.milestone = self
            .milestones
            .iter()
            .copied()
            .filter(|&m| m > self.last_milestone_shown && self.current >= m)
            .max();
        if let Some(m) = outcome.milestone {
            self.last_milestone_shown = m;
        }

        self.last_play_day = Some(today);
        self.marked_today = true;
        outcome.show_toast = self.take_toast(today);
        outcome
    }

    /// Clear the per-day flag at a calendar rollover.
    pub fn begin_day(&mut self) {
        self.marked_today = false;
    }

    /// Spend one banked hint.
    pub fn spend_hint(&mut self) -> bool {
        if self.hints_available == 0 {
            return false;
        }
        self.hints_available -= 1;
        true
    }

    fn take_toast(&mut self, today: DayKey) -> bool {
        if self.toast_shown_day == Some(today) {
            return false;
        }
        self.toast_shown_day = Some(today);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    fn rules() -> StreakRules {
        StreakRules::default()
    }

    fn streak_at(current: u32, last: &str, freezes: u32) -> Streak {
        Streak {
            current,
            best: current,
            last_play_day: Some(day(last)),
            available_freezes: freezes,
            ..Streak::default()
        }
    }

    #[test]
    fn first_play_starts_streak() {
        let mut streak = Streak::default();
        let outcome = streak.mark_played_today(day("2025-01-10"), &rules());

        assert!(outcome.changed);
        assert!(outcome.new_best);
        assert!(outcome.show_toast);
        assert_eq!(streak.current, 1);
        assert_eq!(streak.best, 1);
        assert!(streak.marked_today);
    }

    #[test]
    fn second_call_same_day_is_noop() {
        let mut streak = Streak::default();
        let today = day("2025-01-10");
        streak.mark_played_today(today, &rules());
        let before = streak.clone();

        let outcome = streak.mark_played_today(today, &rules());
        assert_eq!(outcome, PlayOutcome::default());
        assert_eq!(streak, before);
    }

    #[test]
    fn lost_flag_same_day_only_remarks() {
        let mut streak = streak_at(4, "2025-01-10", 0);
        let outcome = streak.mark_played_today(day("2025-01-10"), &rules());

        assert!(outcome.changed);
        assert!(!outcome.new_best);
        assert_eq!(streak.current, 4);
        assert!(streak.marked_today);
    }

    #[test]
    fn consecutive_day_extends() {
        let mut streak = streak_at(2, "2025-01-31", 0);
        streak.mark_played_today(day("2025-02-01"), &rules());
        assert_eq!(streak.current, 3);
    }

    #[test]
    fn freeze_bridges_one_missed_day() {
        let mut streak = streak_at(3, "2025-01-10", 1);
        let outcome = streak.mark_played_today(day("2025-01-12"), &rules());

        assert!(outcome.used_freeze);
        assert_eq!(streak.current, 4);
        assert_eq!(streak.available_freezes, 0);
        assert!(streak.used_freeze_days.contains(&day("2025-01-12")));
    }

    #[test]
    fn missed_day_without_freeze_resets() {
        let mut streak = streak_at(3, "2025-01-10", 0);
        let outcome = streak.mark_played_today(day("2025-01-12"), &rules());

        assert!(!outcome.used_freeze);
        assert_eq!(streak.current, 1);
        assert_eq!(streak.best, 3);
    }

    #[test]
    fn longer_gap_resets_even_with_freezes() {
        let mut streak = streak_at(3, "2025-01-10", 2);
        streak.mark_played_today(day("2025-01-13"), &rules());
        assert_eq!(streak.current, 1);
        assert_eq!(streak.available_freezes, 2);
    }

    #[test]
    fn backwards_clock_does_not_rewind() {
        let mut streak = streak_at(5, "2025-01-10", 0);
        streak.marked_today = true;
        let outcome = streak.mark_played_today(day("2025-01-08"), &rules());

        assert!(outcome.changed);
        assert_eq!(streak.current, 5);
        assert_eq!(streak.last_play_day, Some(day("2025-01-10")));
    }

    #[test]
    fn freeze_earned_once_per_month() {
        let mut streak = streak_at(6, "2025-03-09", 0);
        let outcome = streak.mark_played_today(day("2025-03-10"), &rules());
        assert!(outcome.earned_freeze);
        assert_eq!(streak.available_freezes, 1);

        let outcome = streak.mark_played_today(day("2025-03-11"), &rules());
        assert!(!outcome.earned_freeze);
        assert_eq!(streak.available_freezes, 1);

        let mut streak = streak_at(20, "2025-03-31", 1);
        streak.earned_months.insert("2025-03".to_string());
        let outcome = streak.mark_played_today(day("2025-04-01"), &rules());
        assert!(outcome.earned_freeze);
        assert_eq!(streak.available_freezes, 2);
    }

    #[test]
    fn hint_earned_on_multiples() {
        let mut streak = streak_at(4, "2025-05-01", 0);
        let outcome = streak.mark_played_today(day("2025-05-02"), &rules());
        assert!(outcome.earned_hint);
        assert_eq!(streak.hints_available, 1);

        let outcome = streak.mark_played_today(day("2025-05-03"), &rules());
        assert!(!outcome.earned_hint);
        assert_eq!(streak.hints_available, 1);
    }

    #[test]
    fn milestone_reports_largest_passed_threshold() {
        let mut streak = streak_at(6, "2025-05-01", 0);
        let outcome = streak.mark_played_today(day("2025-05-02"), &rules());
        assert_eq!(outcome.milestone, Some(7));
        assert_eq!(streak.last_milestone_shown, 7);

        let outcome = streak.mark_played_today(day("2025-05-03"), &rules());
        assert_eq!(outcome.milestone, None);
    }

    #[test]
    fn toast_shown_once_per_day() {
        let mut streak = streak_at(1, "2025-05-01", 0);
        streak.toast_shown_day = Some(day("2025-05-02"));
        let outcome = streak.mark_played_today(day("2025-05-02"), &rules());
        assert!(!outcome.show_toast);
    }

    #[test]
    fn counters_saturate_at_their_maximum() {
        let mut streak = streak_at(u32::MAX, "2025-05-01", u32::MAX);
        streak.hints_available = u32::MAX;
        let outcome = streak.mark_played_today(day("2025-05-02"), &rules());

        assert!(outcome.earned_freeze);
        assert_eq!(streak.current, u32::MAX);
        assert_eq!(streak.best, u32::MAX);
        assert_eq!(streak.available_freezes, u32::MAX);
        assert_eq!(streak.hints_available, u32::MAX);

        let mut streak = streak_at(u32::MAX, "2025-05-01", 1);
        assert!(streak.mark_played_today(day("2025-05-03"), &rules()).used_freeze);
        assert_eq!(streak.current, u32::MAX);
    }

    #[test]
    fn spend_hint_needs_balance() {
        let mut streak = Streak::default();
        assert!(!streak.spend_hint());
        streak.hints_available = 1;
        assert!(streak.spend_hint());
        assert_eq!(streak.hints_available, 0);
    }
}
