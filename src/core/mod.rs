//! Core puzzle types and logic.
//!
//! This module contains the pure part of a puzzle:
//! - Marks and the two-pass guess evaluator
//! - The attempt state machine (`Entering` -> `Won` | `Lost`)
//! - The `State` trait implemented by puzzle phases
//!
//! Nothing here performs I/O; persistence lives in `checkpoint` and
//! `ledger`.

mod attempt;
mod error;
mod evaluate;
mod macros;
mod mark;
mod phase;
mod result;
mod state;

pub use attempt::{AttemptState, Cursor};
pub(crate) use attempt::is_word_of_len;
pub use error::{AttemptError, RejectReason};
pub use evaluate::{evaluate, update_key_status, KeyStatus};
pub use mark::Mark;
pub use phase::AttemptPhase;
pub use result::{PuzzleResult, Submission};
pub use state::State;
