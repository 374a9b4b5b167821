//! Guess validation and daily answer selection.
//!
//! The puzzle core only needs a yes/no membership check per submit; this
//! module provides the trait plus two implementations (an exact word list
//! and a compact Bloom filter) and the deterministic daily picker.

mod bloom;
mod picker;
mod wordlist;

pub use bloom::{BloomFilter, BloomMeta};
pub use picker::{AnswerPicker, DailyPicker};
pub use wordlist::{looks_playable, WordList, BANNED_ABBREVIATIONS};

use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

/// Shortest word the default ladder accepts.
pub const MIN_WORD_LEN: usize = 4;
/// Longest word the default ladder accepts.
pub const MAX_WORD_LEN: usize = 7;

/// Allow/deny check for guesses.
///
/// Consulted exactly once per accepted-length submit. Implementations may
/// report false positives (a Bloom filter does) but must never reject a
/// real word.
pub trait MembershipOracle {
    fn has(&self, word: &str) -> bool;
}

impl<T: MembershipOracle + ?Sized> MembershipOracle for &T {
    fn has(&self, word: &str) -> bool {
        (**self).has(word)
    }
}

impl<T: MembershipOracle + ?Sized> MembershipOracle for Box<T> {
    fn has(&self, word: &str) -> bool {
        (**self).has(word)
    }
}

impl MembershipOracle for HashSet<String> {
    fn has(&self, word: &str) -> bool {
        self.contains(&word.to_ascii_uppercase())
    }
}

impl MembershipOracle for BTreeSet<String> {
    fn has(&self, word: &str) -> bool {
        self.contains(&word.to_ascii_uppercase())
    }
}

/// Errors raised while building an oracle from external data
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Invalid Bloom filter: {0}")]
    InvalidBloom(String),

    #[error("Invalid Bloom metadata: {0}")]
    Meta(#[from] serde_json::Error),
}
