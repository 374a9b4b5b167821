//! Attempt state machine for a single puzzle.
//!
//! Letters fill the current row left to right; a full row is checked
//! against the membership oracle, evaluated, and either resolves the
//! puzzle or moves the cursor to the next row.

use super::error::AttemptError;
use super::evaluate::{evaluate_chars, update_key_status, KeyStatus};
use super::mark::Mark;
use super::phase::AttemptPhase;
use super::result::Submission;
use crate::oracle::MembershipOracle;
use serde::{Deserialize, Serialize};

/// Next writable cell.
///
/// `row < rows` and `col <= cols` always hold; `col == cols` means the row
/// is full and waiting for a submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

/// One puzzle instance: a `rows` x `cols` board played against `answer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptState {
    rows: usize,
    cols: usize,
    board: Vec<Vec<Option<char>>>,
    row_marks: Vec<Vec<Mark>>,
    cursor: Cursor,
    done: bool,
    win: bool,
    answer: String,
    key_status: KeyStatus,
}

impl AttemptState {
    /// Start a fresh puzzle.
    ///
    /// The answer is uppercased; it must be exactly `cols` letters A-Z and
    /// `rows` must be at least one.
    ///
    /// # Examples
    /// ```
    /// use wordscend::core::{AttemptPhase, AttemptState};
    ///
    /// let puzzle = AttemptState::new(6, 5, "crane").unwrap();
    /// assert_eq!(puzzle.answer(), "CRANE");
    /// assert_eq!(puzzle.phase(), AttemptPhase::Entering);
    ///
    /// assert!(AttemptState::new(6, 5, "cranes").is_err());
    /// ```
    pub fn new(rows: usize, cols: usize, answer: &str) -> Result<Self, AttemptError> {
        let answer = answer.trim().to_ascii_uppercase();
        if rows == 0 || cols == 0 || !is_word_of_len(&answer, cols) {
            return Err(AttemptError::InvalidAnswer { answer, cols });
        }

        Ok(Self {
            rows,
            cols,
            board: vec![vec![None; cols]; rows],
            row_marks: vec![vec![Mark::Unset; cols]; rows],
            cursor: Cursor::default(),
            done: false,
            win: false,
            answer,
            key_status: KeyStatus::new(),
        })
    }

    /// Reassemble a puzzle from parts that were already bounds-checked.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        rows: usize,
        cols: usize,
        board: Vec<Vec<Option<char>>>,
        row_marks: Vec<Vec<Mark>>,
        cursor: Cursor,
        done: bool,
        win: bool,
        answer: String,
        key_status: KeyStatus,
    ) -> Self {
        Self {
            rows,
            cols,
            board,
            row_marks,
            cursor,
            done,
            win,
            answer,
            key_status,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn board(&self) -> &[Vec<Option<char>>] {
        &self.board
    }

    pub fn row_marks(&self) -> &[Vec<Mark>] {
        &self.row_marks
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn is_win(&self) -> bool {
        self.win
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn key_status(&self) -> &KeyStatus {
        &self.key_status
    }

    pub fn phase(&self) -> AttemptPhase {
        AttemptPhase::from_flags(self.done, self.win)
    }

    /// Number of rows submitted so far.
    pub fn attempts_used(&self) -> usize {
        if self.done {
            self.cursor.row + 1
        } else {
            self.cursor.row
        }
    }

    /// Letters typed into the current row.
    pub fn guess(&self) -> String {
        self.board[self.cursor.row].iter().flatten().collect()
    }

    /// Write `ch` at the cursor and advance it.
    pub fn add_letter(&mut self, ch: char) -> Result<(), AttemptError> {
        if self.done {
            return Err(AttemptError::AlreadyDone);
        }
        if !ch.is_ascii_alphabetic() {
            return Err(AttemptError::InvalidLetter(ch));
        }
        if self.cursor.col >= self.cols {
            return Err(AttemptError::RowFull);
        }

        let Cursor { row, col } = self.cursor;
        self.board[row][col] = Some(ch.to_ascii_uppercase());
        self.cursor.col = col + 1;
        Ok(())
    }

    /// Clear the cell before the cursor and move back onto it.
    pub fn backspace(&mut self) -> Result<(), AttemptError> {
        if self.done {
            return Err(AttemptError::AlreadyDone);
        }
        if self.cursor.col == 0 {
            return Err(AttemptError::RowEmpty);
        }

        self.cursor.col -= 1;
        self.board[self.cursor.row][self.cursor.col] = None;
        Ok(())
    }

    /// Submit the current row.
    ///
    /// Rejections (`AlreadyDone`, `Incomplete`, `NotAllowed`) leave the
    /// puzzle untouched. An accepted row stores its marks, folds them into
    /// the key status and then resolves the puzzle or moves to the next row.
    pub fn submit_row<O>(&mut self, oracle: &O) -> Result<Submission, AttemptError>
    where
        O: MembershipOracle + ?Sized,
    {
        if self.done {
            return Err(AttemptError::AlreadyDone);
        }
        if self.cursor.col < self.cols {
            return Err(AttemptError::Incomplete {
                filled: self.cursor.col,
                needed: self.cols,
            });
        }

        let row = self.cursor.row;
        let guess: Vec<char> = self.board[row].iter().flatten().copied().collect();
        let word: String = guess.iter().collect();
        if !oracle.has(&word) {
            return Err(AttemptError::NotAllowed { guess: word });
        }

        let answer: Vec<char> = self.answer.chars().collect();
        let marks = evaluate_chars(&guess, &answer)?;

        self.row_marks[row] = marks.clone();
        update_key_status(&mut self.key_status, &guess, &marks);

        let win = marks.iter().all(|m| m.is_correct());
        if win {
            self.done = true;
            self.win = true;
        } else if row + 1 == self.rows {
            self.done = true;
            self.win = false;
        } else {
            self.cursor = Cursor {
                row: row + 1,
                col: 0,
            };
        }

        Ok(Submission {
            attempt: row + 1,
            marks,
            done: self.done,
            win,
        })
    }

    /// Leftmost position whose letter no submitted row has pinned down,
    /// paired with the answer's letter there.
    pub fn unrevealed(&self) -> Option<(usize, char)> {
        self.answer.chars().enumerate().find(|&(i, _)| {
            !self
                .row_marks
                .iter()
                .any(|marks| marks.get(i).is_some_and(|m| m.is_correct()))
        })
    }
}

pub(crate) fn is_word_of_len(word: &str, len: usize) -> bool {
    word.len() == len && word.chars().all(|c| c.is_ascii_uppercase())
}
