//! Per-cell evaluation marks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Evaluation of one cell of a submitted row.
///
/// Variants are declared in rank order so the derived `Ord` gives
/// `Unset < Absent < Present < Correct`, the ranking used for keyboard
/// coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    /// Row not submitted yet
    #[default]
    Unset,
    /// Letter does not occur in the answer (or all copies are accounted for)
    Absent,
    /// Letter occurs in the answer at another position
    Present,
    /// Letter matches the answer at this position
    Correct,
}

impl Mark {
    /// Parse a persisted mark name.
    ///
    /// Returns `None` for anything outside the legal set, which lets the
    /// snapshot decoder drop garbage instead of trusting it.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "correct" => Some(Self::Correct),
            "present" => Some(Self::Present),
            "absent" => Some(Self::Absent),
            "unset" | "" => Some(Self::Unset),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Absent => "absent",
            Self::Present => "present",
            Self::Correct => "correct",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }

    /// Emoji square for share text.
    #[must_use]
    pub const fn to_emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent | Self::Unset => '⬜',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_orders_marks() {
        assert!(Mark::Unset < Mark::Absent);
        assert!(Mark::Absent < Mark::Present);
        assert!(Mark::Present < Mark::Correct);
        assert_eq!(Mark::Absent.max(Mark::Correct), Mark::Correct);
    }

    #[test]
    fn parse_accepts_only_legal_names() {
        assert_eq!(Mark::parse("correct"), Some(Mark::Correct));
        assert_eq!(Mark::parse("present"), Some(Mark::Present));
        assert_eq!(Mark::parse("absent"), Some(Mark::Absent));
        assert_eq!(Mark::parse(""), Some(Mark::Unset));
        assert_eq!(Mark::parse("green"), None);
        assert_eq!(Mark::parse("CORRECT"), None);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mark::Present).unwrap(), "\"present\"");
        let mark: Mark = serde_json::from_str("\"absent\"").unwrap();
        assert_eq!(mark, Mark::Absent);
    }

    #[test]
    fn emoji_matches_mark() {
        let row: String = [Mark::Correct, Mark::Present, Mark::Absent]
            .iter()
            .map(|m| m.to_emoji())
            .collect();
        assert_eq!(row, "🟩🟨⬜");
    }
}
