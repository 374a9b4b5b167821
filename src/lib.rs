//! Wordscend: daily word puzzle attempts and the progression ledger
//!
//! Wordscend follows a "pure core, imperative shell" layout.
//! The puzzle itself (evaluation, the attempt state machine, snapshots and
//! the streak economy) is pure state and transition logic; the only I/O is
//! the ledger store, reached through the thin [`session`] shell.
//!
//! # Core Concepts
//!
//! - **Attempt**: one bounded puzzle, `Entering` until it is `Won` or `Lost`
//! - **Snapshot**: a mid-puzzle copy that survives a reload on the same day
//! - **Ledger**: score, level and the streak/freeze/hint economy across days
//! - **Oracle**: the yes/no dictionary check consulted on every submit
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashSet;
//! use wordscend::core::{AttemptPhase, AttemptState, Mark, State};
//!
//! let dictionary: HashSet<String> = ["CRATE", "CRANE"].iter().map(|w| w.to_string()).collect();
//! let mut attempt = AttemptState::new(6, 5, "CRANE").unwrap();
//!
//! for ch in "crate".chars() {
//!     attempt.add_letter(ch).unwrap();
//! }
//! let submission = attempt.submit_row(&dictionary).unwrap();
//! assert_eq!(submission.marks[3], Mark::Absent);
//! assert_eq!(attempt.phase(), AttemptPhase::Entering);
//!
//! for ch in "CRANE".chars() {
//!     attempt.add_letter(ch).unwrap();
//! }
//! attempt.submit_row(&dictionary).unwrap();
//! assert!(attempt.phase().is_final());
//! ```

pub mod checkpoint;
pub mod config;
pub mod core;
pub mod ledger;
pub mod oracle;
pub mod session;

// Re-export commonly used types
pub use config::GameConfig;
pub use core::{evaluate, AttemptPhase, AttemptState, Mark, PuzzleResult, State};
pub use ledger::{DayKey, Ledger, Streak};
pub use oracle::{MembershipOracle, WordList};
pub use session::Session;
