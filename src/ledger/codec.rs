//! Lenient decoding of the persisted ledger document.
//!
//! Stored data is never trusted: counters are clamped, malformed dates and
//! duplicates are dropped, and each snapshot is decoded on its own so one
//! bad snapshot costs only that puzzle's progress.

use super::day::DayKey;
use super::error::LedgerError;
use super::streak::Streak;
use super::Ledger;
use crate::checkpoint::Snapshot;
use crate::config::GameConfig;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

pub(super) fn decode(document: &str, today: DayKey, config: &GameConfig) -> Result<Ledger, LedgerError> {
    let value: Value = serde_json::from_str(document)
        .map_err(|err| LedgerError::CorruptPersisted(err.to_string()))?;
    let obj = value
        .as_object()
        .ok_or_else(|| LedgerError::CorruptPersisted("document is not an object".to_string()))?;

    let streak = decode_streak(obj.get("streak"), config);
    let hints_used = obj
        .get("hintsUsed")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(length_of).collect())
        .unwrap_or_default();

    // Without a valid day the day-scoped fields cannot be attributed to
    // any date, so they start over.
    let Some(day) = obj.get("day").and_then(day_of) else {
        tracing::warn!("Stored ledger has no valid day; keeping streak only");
        let mut ledger = Ledger::new(today, config);
        ledger.streak = streak;
        ledger.streak.begin_day();
        return Ok(ledger);
    };

    Ok(Ledger {
        day,
        score: obj.get("score").and_then(int_of).unwrap_or(0),
        level_index: decode_level_index(obj, config),
        streak,
        progress_by_length: decode_progress(obj.get("progressByLength")),
        hints_used,
    })
}

fn decode_level_index(obj: &Map<String, Value>, config: &GameConfig) -> usize {
    let index = match obj.get("levelIndex").and_then(int_of) {
        Some(index) => usize::try_from(index).unwrap_or(0),
        None => obj
            .get("levelLen")
            .and_then(length_of)
            .and_then(|len| config.level_lengths.iter().position(|&l| l == len))
            .unwrap_or(0),
    };
    if index < config.level_count() {
        index
    } else {
        0
    }
}

fn decode_progress(value: Option<&Value>) -> BTreeMap<usize, Snapshot> {
    let Some(entries) = value.and_then(Value::as_object) else {
        return BTreeMap::new();
    };

    entries
        .iter()
        .filter_map(|(key, raw)| {
            let length: usize = key.parse().ok()?;
            match Snapshot::decode(raw) {
                Ok(snapshot) if snapshot.cols() == length => Some((length, snapshot)),
                Ok(_) => {
                    tracing::warn!(length, "Dropping snapshot stored under the wrong length");
                    None
                }
                Err(err) => {
                    tracing::warn!(length, %err, "Dropping corrupt snapshot");
                    None
                }
            }
        })
        .collect()
}

fn decode_streak(value: Option<&Value>, config: &GameConfig) -> Streak {
    let mut streak = Streak::new(config.streak.milestones.clone());
    let Some(obj) = value.and_then(Value::as_object) else {
        return streak;
    };

    streak.current = count_of(obj.get("current"));
    streak.best = count_of(obj.get("best")).max(streak.current);
    streak.last_play_day = obj.get("lastPlayDay").and_then(day_of);
    streak.marked_today = obj
        .get("markedToday")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    streak.available_freezes = count_of(obj.get("availableFreezes"));
    streak.earned_months = strings_of(obj.get("earnedMonths"))
        .filter(|m| is_month_key(m))
        .collect();
    streak.used_freeze_days = day_set(obj.get("usedFreezeDays"));
    if let Some(items) = obj.get("milestones").and_then(Value::as_array) {
        let mut milestones: Vec<u32> = items
            .iter()
            .filter_map(int_of)
            .filter_map(|m| u32::try_from(m).ok())
            .filter(|&m| m > 0)
            .collect();
        milestones.sort_unstable();
        milestones.dedup();
        streak.milestones = milestones;
    }
    streak.last_milestone_shown = count_of(obj.get("lastMilestoneShown"));
    streak.hints_available = count_of(obj.get("hintsAvailable"));
    streak.hint_earned_days = day_set(obj.get("hintEarnedDays"));
    streak.toast_shown_day = obj.get("toastShownDay").and_then(day_of);
    streak
}

fn int_of(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    })
}

/// Non-negative counter; negatives and garbage become zero.
fn count_of(value: Option<&Value>) -> u32 {
    value
        .and_then(int_of)
        .map_or(0, |n| u32::try_from(n.max(0)).unwrap_or(u32::MAX))
}

fn length_of(value: &Value) -> Option<usize> {
    int_of(value)
        .and_then(|n| usize::try_from(n).ok())
        .filter(|&n| n > 0)
}

fn day_of(value: &Value) -> Option<DayKey> {
    value.as_str()?.parse().ok()
}

fn strings_of(value: Option<&Value>) -> impl Iterator<Item = String> + '_ {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|v| v.as_str().map(str::to_string))
}

fn day_set(value: Option<&Value>) -> BTreeSet<DayKey> {
    strings_of(value).filter_map(|s| s.parse().ok()).collect()
}

fn is_month_key(raw: &str) -> bool {
    raw.len() == 7 && format!("{raw}-01").parse::<DayKey>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    fn decode_value(value: Value) -> Ledger {
        decode(&value.to_string(), day("2025-07-04"), &GameConfig::default()).unwrap()
    }

    #[test]
    fn rejects_non_documents() {
        let config = GameConfig::default();
        assert!(decode("not json", day("2025-07-04"), &config).is_err());
        assert!(decode("[1, 2]", day("2025-07-04"), &config).is_err());
    }

    #[test]
    fn clamps_and_deduplicates_streak() {
        let ledger = decode_value(json!({
            "day": "2025-07-04",
            "score": -30,
            "levelIndex": 2,
            "streak": {
                "current": 9,
                "best": 4,
                "availableFreezes": -2,
                "hintsAvailable": 2.0,
                "earnedMonths": ["2025-06", "2025-06", "June", "2025-13"],
                "usedFreezeDays": ["2025-06-03", "bad"],
                "milestones": [30, 7, 7, 0, 3],
                "lastPlayDay": "2025-07-03"
            }
        }));

        assert_eq!(ledger.score, -30);
        assert_eq!(ledger.level_index, 2);
        assert_eq!(ledger.streak.current, 9);
        assert_eq!(ledger.streak.best, 9);
        assert_eq!(ledger.streak.available_freezes, 0);
        assert_eq!(ledger.streak.hints_available, 2);
        assert_eq!(ledger.streak.earned_months.len(), 1);
        assert_eq!(ledger.streak.used_freeze_days.len(), 1);
        assert_eq!(ledger.streak.milestones, vec![3, 7, 30]);
        assert_eq!(ledger.streak.last_play_day, Some(day("2025-07-03")));
    }

    #[test]
    fn out_of_range_level_falls_back_to_first() {
        let ledger = decode_value(json!({"day": "2025-07-04", "levelIndex": 12}));
        assert_eq!(ledger.level_index, 0);
    }

    #[test]
    fn migrates_legacy_level_length() {
        let ledger = decode_value(json!({"day": "2025-07-04", "levelLen": 6}));
        assert_eq!(ledger.level_index, 2);

        let ledger = decode_value(json!({"day": "2025-07-04", "levelLen": 9}));
        assert_eq!(ledger.level_index, 0);
    }

    #[test]
    fn missing_day_keeps_only_streak() {
        let ledger = decode_value(json!({
            "score": 500,
            "levelIndex": 3,
            "streak": {"current": 4, "best": 6, "markedToday": true}
        }));
        assert_eq!(ledger.day, day("2025-07-04"));
        assert_eq!(ledger.score, 0);
        assert_eq!(ledger.level_index, 0);
        assert_eq!(ledger.streak.best, 6);
        assert!(!ledger.streak.marked_today);
    }

    #[test]
    fn bad_snapshot_does_not_poison_ledger() {
        let ledger = decode_value(json!({
            "day": "2025-07-04",
            "score": 170,
            "progressByLength": {
                "4": {"day": "2025-07-04", "answer": "WORD", "rows": 6, "cols": 4},
                "5": {"day": "2025-07-04", "answer": "WORD", "rows": 6, "cols": 4},
                "6": {"board": 12},
                "x": {}
            }
        }));

        assert_eq!(ledger.score, 170);
        assert_eq!(ledger.progress_by_length.len(), 1);
        assert!(ledger.progress_by_length.contains_key(&4));
    }
}
