//! Exact word lists loaded from newline-separated text.

use super::{MembershipOracle, MAX_WORD_LEN, MIN_WORD_LEN};
use std::collections::HashSet;

/// Abbreviations that slip into open word lists but make poor guesses.
pub const BANNED_ABBREVIATIONS: &[&str] = &[
    "FIFA", "NATO", "NASA", "ASAP", "DIY", "ETA", "FAQ", "HDMI", "JPEG", "PDF", "USB", "HTML",
    "CSS", "JSON", "KPI", "ROI", "OAUTH", "YAML", "XML", "API", "IPSEC",
];

/// Check that `word` is letters only, within `min..=max` long and not a
/// banned abbreviation. Case-insensitive.
///
/// # Examples
/// ```
/// use wordscend::oracle::looks_playable;
///
/// assert!(looks_playable("crane", 4, 7));
/// assert!(!looks_playable("nasa", 4, 7));
/// assert!(!looks_playable("cat", 4, 7));
/// assert!(!looks_playable("can't", 4, 7));
/// ```
pub fn looks_playable(word: &str, min: usize, max: usize) -> bool {
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    if word.len() < min || word.len() > max {
        return false;
    }
    let upper = word.to_ascii_uppercase();
    !BANNED_ABBREVIATIONS.contains(&upper.as_str())
}

/// Uppercase allowed-guess set with length bounds.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
    min_len: usize,
    max_len: usize,
}

impl WordList {
    /// Parse a word list with the default 4..=7 bounds.
    pub fn parse(text: &str) -> Self {
        Self::parse_with_bounds(text, MIN_WORD_LEN, MAX_WORD_LEN)
    }

    /// Parse a word list, one word per line (`\n` or `\r\n`).
    ///
    /// Lines are trimmed and uppercased; blanks, non-letters, out-of-range
    /// lengths and banned abbreviations are skipped.
    pub fn parse_with_bounds(text: &str, min_len: usize, max_len: usize) -> Self {
        let words: HashSet<String> = text
            .lines()
            .map(|line| line.trim().to_ascii_uppercase())
            .filter(|word| looks_playable(word, min_len, max_len))
            .collect();

        tracing::debug!(count = words.len(), min_len, max_len, "Parsed word list");

        Self {
            words,
            min_len,
            max_len,
        }
    }

    /// Build a list from already-known words, applying the default bounds.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_ascii_uppercase())
            .filter(|w| looks_playable(w, MIN_WORD_LEN, MAX_WORD_LEN))
            .collect();
        Self {
            words,
            min_len: MIN_WORD_LEN,
            max_len: MAX_WORD_LEN,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Sorted words of exactly `len` letters.
    ///
    /// Sorted so the daily picker sees the same candidate order on every
    /// run.
    pub fn words_of_length(&self, len: usize) -> Vec<String> {
        let mut out: Vec<String> = self.words.iter().filter(|w| w.len() == len).cloned().collect();
        out.sort_unstable();
        out
    }
}

impl MembershipOracle for WordList {
    fn has(&self, word: &str) -> bool {
        looks_playable(word, self.min_len, self.max_len)
            && self.words.contains(&word.to_ascii_uppercase())
    }
}
