//! Puzzle result events.

use super::error::{AttemptError, RejectReason};
use super::mark::Mark;
use serde::{Deserialize, Serialize};

/// Outcome of an accepted submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// 1-based attempt number of the submitted row
    pub attempt: usize,
    pub marks: Vec<Mark>,
    /// Whether the puzzle reached a terminal phase
    pub done: bool,
    pub win: bool,
}

/// Event emitted for every submit, accepted or not.
///
/// Consumed by rendering (row flip, shake) and by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleResult {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectReason>,
    pub attempt: usize,
    pub done: bool,
    pub win: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<Mark>>,
}

impl PuzzleResult {
    /// Build the event for a submit made on row `attempt` (1-based).
    #[must_use]
    pub fn from_outcome(outcome: &Result<Submission, AttemptError>, attempt: usize) -> Self {
        match outcome {
            Ok(sub) => Self {
                ok: true,
                reason: None,
                attempt: sub.attempt,
                done: sub.done,
                win: sub.win,
                marks: Some(sub.marks.clone()),
            },
            Err(err) => Self {
                ok: false,
                reason: Some(err.reason()),
                attempt,
                done: matches!(err, AttemptError::AlreadyDone),
                win: false,
                marks: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_submit_carries_marks() {
        let outcome = Ok(Submission {
            attempt: 2,
            marks: vec![Mark::Correct; 4],
            done: true,
            win: true,
        });
        let event = PuzzleResult::from_outcome(&outcome, 2);
        assert!(event.ok);
        assert!(event.win);
        assert_eq!(event.reason, None);
        assert_eq!(event.marks.as_deref(), Some(&[Mark::Correct; 4][..]));
    }

    #[test]
    fn rejected_submit_has_reason_and_no_marks() {
        let outcome = Err(AttemptError::NotAllowed {
            guess: "QQQQ".to_string(),
        });
        let event = PuzzleResult::from_outcome(&outcome, 3);
        assert!(!event.ok);
        assert_eq!(event.reason, Some(RejectReason::NotAllowed));
        assert_eq!(event.attempt, 3);
        assert!(event.marks.is_none());

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["reason"], "not_allowed");
        assert!(json.get("marks").is_none());
    }
}
