//! Mid-puzzle snapshots.
//!
//! A snapshot is a deep copy of an [`AttemptState`] stamped with the day it
//! was taken. It is written after every accepted input so a reload resumes
//! the same puzzle, and it is only trusted again when the day, answer and
//! word length all match the puzzle being resumed.

use crate::core::{is_word_of_len, AttemptState, Cursor, KeyStatus, Mark};
use crate::ledger::DayKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stillwater::validation::Validation;

pub mod error;

pub use error::{CheckpointError, SnapshotMismatch};

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Upper bound on rows accepted from persisted data.
const MAX_ROWS: usize = 32;

/// Serializable copy of a puzzle in progress.
///
/// Only [`snapshot`] and [`Snapshot::decode`] construct one, so every value
/// in hand is bounds-checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    version: u32,
    day: DayKey,
    answer: String,
    rows: usize,
    cols: usize,
    board: Vec<Vec<Option<char>>>,
    row_marks: Vec<Vec<Mark>>,
    cursor: Cursor,
    done: bool,
    win: bool,
    key_status: KeyStatus,
}

/// Capture `state` as it stands on `day`.
pub fn snapshot(state: &AttemptState, day: DayKey) -> Snapshot {
    Snapshot {
        version: SNAPSHOT_VERSION,
        day,
        answer: state.answer().to_string(),
        rows: state.rows(),
        cols: state.cols(),
        board: state.board().to_vec(),
        row_marks: state.row_marks().to_vec(),
        cursor: state.cursor(),
        done: state.is_done(),
        win: state.is_win(),
        key_status: state.key_status().clone(),
    }
}

/// Rebuild the puzzle from `stored` if it belongs to the expected one.
///
/// Returns `None` when the day, answer or column count differ; the caller
/// then starts a fresh puzzle and drops the snapshot.
pub fn restore(
    stored: &Snapshot,
    expected_answer: &str,
    expected_cols: usize,
    expected_day: DayKey,
) -> Option<AttemptState> {
    match stored.verify(expected_answer, expected_cols, expected_day) {
        Ok(()) => Some(stored.to_attempt()),
        Err(err) => {
            tracing::debug!(%err, "Discarding snapshot");
            None
        }
    }
}

impl Snapshot {
    pub fn day(&self) -> DayKey {
        self.day
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Compare the identity fields against the live puzzle, collecting
    /// every mismatch.
    pub fn verify(
        &self,
        expected_answer: &str,
        expected_cols: usize,
        expected_day: DayKey,
    ) -> Result<(), CheckpointError> {
        let checks = vec![
            check(self.day == expected_day, || SnapshotMismatch::Day {
                stored: self.day.to_string(),
                expected: expected_day.to_string(),
            }),
            check(
                self.answer.eq_ignore_ascii_case(expected_answer.trim()),
                || SnapshotMismatch::Answer,
            ),
            check(self.cols == expected_cols, || SnapshotMismatch::Cols {
                stored: self.cols,
                expected: expected_cols,
            }),
        ];

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(mismatches) => Err(CheckpointError::Mismatch(mismatches)),
        }
    }

    fn to_attempt(&self) -> AttemptState {
        AttemptState::from_parts(
            self.rows,
            self.cols,
            self.board.clone(),
            self.row_marks.clone(),
            self.cursor,
            self.done,
            self.win,
            self.answer.clone(),
            self.key_status.clone(),
        )
    }

    /// Decode a persisted snapshot without trusting it.
    ///
    /// The identity fields (day, answer, cols) must be present and well
    /// formed. Everything else is repaired: the board is resized to
    /// `rows x cols`, cells that are not a single letter become empty,
    /// unknown marks become `Unset`, the cursor is clamped onto the board
    /// and `win` requires `done`.
    pub fn decode(value: &serde_json::Value) -> Result<Self, CheckpointError> {
        let raw = RawSnapshot::deserialize(value)?;

        let version = raw.version.unwrap_or(SNAPSHOT_VERSION);
        if version > SNAPSHOT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let day: DayKey = raw
            .day
            .as_deref()
            .and_then(|d| d.parse().ok())
            .ok_or_else(|| CheckpointError::Corrupt("missing or invalid day".to_string()))?;

        let cols = raw
            .cols
            .filter(|&c| c > 0)
            .ok_or_else(|| CheckpointError::Corrupt("missing or invalid cols".to_string()))?;

        let answer = raw
            .answer
            .map(|a| a.trim().to_ascii_uppercase())
            .filter(|a| is_word_of_len(a, cols))
            .ok_or_else(|| CheckpointError::Corrupt("answer does not fit cols".to_string()))?;

        let rows = raw
            .rows
            .unwrap_or(raw.board.len())
            .clamp(1, MAX_ROWS);

        let mut board = grid(&raw.board, rows, cols, |cell| {
            cell.as_deref().and_then(single_letter)
        });
        let row_marks = grid(&raw.row_marks, rows, cols, |cell| {
            cell.as_deref().and_then(Mark::parse).unwrap_or(Mark::Unset)
        });

        // The board is the source of truth for the cursor column: it sits
        // right after the leading letters of its row, and anything typed
        // past a gap is dropped.
        let row = clamp_index(raw.cursor.unwrap_or_default().row, rows - 1);
        let mut col = 0;
        if let Some(cells) = board.get_mut(row) {
            col = cells.iter().take_while(|cell| cell.is_some()).count();
            cells.iter_mut().skip(col).for_each(|cell| *cell = None);
        }
        let cursor = Cursor { row, col };

        let key_status = raw
            .key_status
            .iter()
            .filter_map(|(key, mark)| {
                let letter = single_letter(key)?;
                let mark = mark.as_deref().and_then(Mark::parse)?;
                (mark != Mark::Unset).then_some((letter, mark))
            })
            .collect();

        Ok(Self {
            version: SNAPSHOT_VERSION,
            day,
            answer,
            rows,
            cols,
            board,
            row_marks,
            cursor,
            done: raw.done,
            win: raw.done && raw.win,
            key_status,
        })
    }
}

/// Loosely typed snapshot as found in storage.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    version: Option<u32>,
    day: Option<String>,
    answer: Option<String>,
    rows: Option<usize>,
    cols: Option<usize>,
    #[serde(default)]
    board: Vec<Vec<Option<String>>>,
    #[serde(default)]
    row_marks: Vec<Vec<Option<String>>>,
    cursor: Option<RawCursor>,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    win: bool,
    #[serde(default)]
    key_status: BTreeMap<String, Option<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCursor {
    #[serde(default)]
    row: i64,
    #[serde(default)]
    col: i64,
}

fn check<F>(ok: bool, mismatch: F) -> Validation<(), Vec<SnapshotMismatch>>
where
    F: FnOnce() -> SnapshotMismatch,
{
    if ok {
        Validation::Success(())
    } else {
        Validation::Failure(vec![mismatch()])
    }
}

fn single_letter(raw: &str) -> Option<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}

fn clamp_index(raw: i64, max: usize) -> usize {
    usize::try_from(raw).map_or(0, |v| v.min(max))
}

fn grid<T, F>(raw: &[Vec<Option<String>>], rows: usize, cols: usize, cell: F) -> Vec<Vec<T>>
where
    F: Fn(&Option<String>) -> T,
{
    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| match raw.get(r).and_then(|row| row.get(c)) {
                    Some(value) => cell(value),
                    None => cell(&None),
                })
                .collect()
        })
        .collect()
}
