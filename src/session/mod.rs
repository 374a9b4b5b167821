//! Imperative shell around the pure puzzle core and the ledger.
//!
//! A [`Session`] owns one live [`AttemptState`], the [`Ledger`] and the
//! store it persists to. Every accepted input is mirrored into a snapshot
//! and written through; write failures are logged and otherwise ignored so
//! the in-memory state stays authoritative.
//!
//! A terminal submit applies its ledger effects immediately and hands back
//! a [`PendingAdvance`]. The caller waits out `delay` (animation, end card)
//! and then calls [`Session::complete_advance`] with the token's id. Stale
//! or repeated ids do nothing, and any command that restarts the puzzle
//! drops the pending token.

mod error;

pub use error::SessionError;

use crate::checkpoint::snapshot;
use crate::config::GameConfig;
use crate::core::{AttemptError, AttemptState, PuzzleResult, RejectReason};
use crate::ledger::{
    DayKey, HintUse, Ledger, LedgerError, LedgerStore, LevelAdvance, PlayOutcome, WinOutcome,
};
use crate::oracle::{AnswerPicker, MembershipOracle, WordList};
use std::collections::BTreeMap;
use std::time::Duration;

/// What the session will do once the pending delay elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceKind {
    /// Start the next level's puzzle
    NextLevel,
    /// Restart the lost level with a fresh board
    Retry,
    /// Show the end card, then start the new run
    RunComplete,
}

/// Token for a scheduled level advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    pub id: u64,
    pub kind: AdvanceKind,
    pub delay: Duration,
}

/// How an accepted submit resolved the puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Won(WinOutcome),
    Lost { length: usize },
}

/// Everything a submit produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReport {
    pub result: PuzzleResult,
    /// Streak changes; `changed` is false for rejected submits and for
    /// repeat plays on the same day
    pub play: PlayOutcome,
    pub resolution: Option<Resolution>,
    pub pending: Option<PendingAdvance>,
}

/// Position and letter uncovered by a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintReveal {
    pub position: usize,
    pub letter: char,
    pub cost: HintUse,
}

pub struct Session<O, P, S> {
    config: GameConfig,
    oracle: O,
    picker: P,
    answers: BTreeMap<usize, Vec<String>>,
    store: S,
    ledger: Ledger,
    attempt: AttemptState,
    pending: Option<PendingAdvance>,
    next_advance_id: u64,
}

impl<O, P, S> Session<O, P, S>
where
    O: MembershipOracle,
    P: AnswerPicker,
    S: LedgerStore,
{
    /// Load the ledger and resume (or start) today's puzzle.
    ///
    /// `answers` supplies the candidates for each ladder length; `oracle`
    /// decides which guesses are accepted.
    pub fn open(
        config: GameConfig,
        oracle: O,
        picker: P,
        answers: &WordList,
        store: S,
        today: DayKey,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let answers: BTreeMap<usize, Vec<String>> = config
            .level_lengths
            .iter()
            .map(|&len| (len, answers.words_of_length(len)))
            .collect();
        let mut ledger = Ledger::load(&store, today, &config);
        let attempt = next_puzzle(&config, &picker, &answers, &mut ledger, true)?;

        let mut session = Self {
            config,
            oracle,
            picker,
            answers,
            store,
            ledger,
            attempt,
            pending: None,
            next_advance_id: 0,
        };
        session.checkpoint();

        tracing::info!(
            day = %session.ledger.day,
            level = session.ledger.level_index + 1,
            resumed = session.attempt.attempts_used() > 0,
            "Session opened"
        );
        Ok(session)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn attempt(&self) -> &AttemptState {
        &self.attempt
    }

    pub fn pending(&self) -> Option<PendingAdvance> {
        self.pending
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn add_letter(&mut self, ch: char) -> Result<(), SessionError> {
        self.attempt.add_letter(ch)?;
        self.checkpoint();
        Ok(())
    }

    pub fn backspace(&mut self) -> Result<(), SessionError> {
        self.attempt.backspace()?;
        self.checkpoint();
        Ok(())
    }

    /// Submit the current row on `today`.
    ///
    /// Rejections come back in `result` with nothing changed. An accepted
    /// row counts today as played; a terminal one also applies the win or
    /// loss to the ledger and schedules the advance.
    ///
    /// If `today` is past the ledger's day the row is not evaluated: the
    /// ledger rolls over, today's first puzzle replaces the stale one and
    /// the result is rejected with [`RejectReason::DayChanged`].
    pub fn submit(&mut self, today: DayKey) -> SubmitReport {
        let attempt_no = self.attempt.cursor().row + 1;
        if self.ledger.roll_over(today) {
            self.pending = None;
            match self.start_puzzle(false) {
                Ok(next) => self.attempt = next,
                Err(err) => tracing::warn!(%err, "No puzzle for the new day"),
            }
            self.checkpoint();
            return SubmitReport {
                result: PuzzleResult {
                    ok: false,
                    reason: Some(RejectReason::DayChanged),
                    attempt: attempt_no,
                    done: false,
                    win: false,
                    marks: None,
                },
                play: PlayOutcome::default(),
                resolution: None,
                pending: None,
            };
        }

        let outcome = self.attempt.submit_row(&self.oracle);
        let result = PuzzleResult::from_outcome(&outcome, attempt_no);

        let submission = match outcome {
            Ok(submission) => submission,
            Err(err) => {
                tracing::debug!(%err, attempt = attempt_no, "Submit rejected");
                return SubmitReport {
                    result,
                    play: PlayOutcome::default(),
                    resolution: None,
                    pending: None,
                };
            }
        };

        let play = self
            .ledger
            .streak
            .mark_played_today(today, &self.config.streak);
        let length = self.attempt.cols();

        let (resolution, pending) = if !submission.done {
            self.ledger
                .save_progress(length, snapshot(&self.attempt, self.ledger.day));
            (None, None)
        } else if submission.win {
            let win = self.ledger.record_win(submission.attempt, today, &self.config);
            let kind = match win.advance {
                LevelAdvance::Next { .. } => AdvanceKind::NextLevel,
                LevelAdvance::RunComplete(_) => AdvanceKind::RunComplete,
            };
            (Some(Resolution::Won(win)), Some(self.schedule(kind)))
        } else {
            self.ledger.record_loss(length);
            tracing::info!(length, answer = self.attempt.answer(), "Puzzle lost");
            (
                Some(Resolution::Lost { length }),
                Some(self.schedule(AdvanceKind::Retry)),
            )
        };

        self.persist();
        SubmitReport {
            result,
            play,
            resolution,
            pending,
        }
    }

    /// Start the next puzzle if `id` names the pending advance.
    ///
    /// Returns `Ok(false)` for a stale or already completed id.
    pub fn complete_advance(&mut self, id: u64) -> Result<bool, SessionError> {
        match self.pending {
            Some(pending) if pending.id == id => {}
            _ => return Ok(false),
        }
        let next = self.start_puzzle(false)?;
        self.pending = None;
        self.attempt = next;
        self.checkpoint();
        Ok(true)
    }

    /// Drop the pending advance, if any.
    pub fn cancel_pending(&mut self) -> Option<PendingAdvance> {
        self.pending.take()
    }

    /// Spend a hint on the current puzzle and reveal one letter.
    pub fn use_hint(&mut self) -> Result<HintReveal, SessionError> {
        if self.attempt.is_done() {
            return Err(AttemptError::AlreadyDone.into());
        }
        let (position, letter) = self
            .attempt
            .unrevealed()
            .ok_or(SessionError::NothingToReveal)?;
        let cost = self.ledger.use_hint(self.attempt.cols(), &self.config)?;
        self.persist();

        Ok(HintReveal {
            position,
            letter,
            cost,
        })
    }

    /// Apply a live score delta from the caller.
    pub fn add_score(&mut self, delta: i64) -> bool {
        let changed = self.ledger.add_score(delta);
        if changed {
            self.persist();
        }
        changed
    }

    /// Jump to a 1-based level and start its puzzle.
    pub fn override_level(&mut self, level: usize) -> Result<bool, SessionError> {
        if !self.ledger.override_level(level, &self.config) {
            return Ok(false);
        }
        self.pending = None;
        self.attempt = self.start_puzzle(true)?;
        self.checkpoint();
        Ok(true)
    }

    /// Wipe the ledger, streak included, and start over on `today`.
    pub fn reset(&mut self, today: DayKey) -> Result<(), SessionError> {
        self.ledger.reset(today, &self.config);
        self.pending = None;
        self.attempt = self.start_puzzle(false)?;
        self.checkpoint();
        Ok(())
    }

    /// Write the ledger, surfacing the failure for teardown callers.
    pub fn flush(&mut self) -> Result<(), LedgerError> {
        if !self.attempt.is_done() {
            self.ledger
                .save_progress(self.attempt.cols(), snapshot(&self.attempt, self.ledger.day));
        }
        self.ledger.save(&mut self.store)
    }

    fn schedule(&mut self, kind: AdvanceKind) -> PendingAdvance {
        self.next_advance_id += 1;
        let pending = PendingAdvance {
            id: self.next_advance_id,
            kind,
            delay: self.config.advance_delay(),
        };
        self.pending = Some(pending);
        pending
    }

    fn start_puzzle(&mut self, resume: bool) -> Result<AttemptState, SessionError> {
        next_puzzle(
            &self.config,
            &self.picker,
            &self.answers,
            &mut self.ledger,
            resume,
        )
    }

    fn checkpoint(&mut self) {
        if !self.attempt.is_done() {
            self.ledger
                .save_progress(self.attempt.cols(), snapshot(&self.attempt, self.ledger.day));
        }
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(err) = self.ledger.save(&mut self.store) {
            tracing::warn!(%err, "Ledger write failed; continuing in memory");
        }
    }
}

/// Puzzle for the ledger's current level, resumed from its snapshot when
/// `resume` is set and the snapshot still matches.
fn next_puzzle<P: AnswerPicker>(
    config: &GameConfig,
    picker: &P,
    answers: &BTreeMap<usize, Vec<String>>,
    ledger: &mut Ledger,
    resume: bool,
) -> Result<AttemptState, SessionError> {
    let level_index = ledger.level_index;
    let length = config
        .length_of_level(level_index)
        .ok_or(SessionError::NoSuchLevel { level_index })?;
    let day = ledger.day;
    let answer = answers
        .get(&length)
        .and_then(|candidates| picker.pick(candidates, day))
        .ok_or(SessionError::NoCandidates { length })?;

    if resume {
        if let Some(state) = ledger.restore_progress(length, answer, day) {
            if !state.is_done() && state.rows() == config.rows {
                return Ok(state);
            }
            tracing::debug!(length, rows = state.rows(), "Discarding finished or resized snapshot");
        }
    }
    ledger.clear_progress(length);
    Ok(AttemptState::new(config.rows, length, answer)?)
}
