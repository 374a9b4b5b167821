//! Guess evaluation and keyboard status tracking.

use super::error::AttemptError;
use super::mark::Mark;
use std::collections::{BTreeMap, HashMap};

/// Best mark seen so far for each letter, used for keyboard coloring.
pub type KeyStatus = BTreeMap<char, Mark>;

/// Evaluate `guess` against `answer`, one mark per position.
///
/// Duplicate letters are handled the usual way:
/// 1. Count the letters of the answer
/// 2. First pass: exact position matches become `Correct` and use up a copy
/// 3. Second pass: remaining positions become `Present` while copies are
///    left, otherwise `Absent`
///
/// The number of `Correct` + `Present` marks for a letter therefore never
/// exceeds its count in the answer.
///
/// # Examples
/// ```
/// use wordscend::core::{evaluate, Mark};
///
/// let marks = evaluate("CRANE", "SLATE").unwrap();
/// assert_eq!(
///     marks,
///     vec![Mark::Absent, Mark::Absent, Mark::Correct, Mark::Absent, Mark::Correct]
/// );
/// ```
pub fn evaluate(guess: &str, answer: &str) -> Result<Vec<Mark>, AttemptError> {
    let guess: Vec<char> = guess.chars().collect();
    let answer: Vec<char> = answer.chars().collect();
    evaluate_chars(&guess, &answer)
}

pub(crate) fn evaluate_chars(guess: &[char], answer: &[char]) -> Result<Vec<Mark>, AttemptError> {
    if guess.len() != answer.len() {
        return Err(AttemptError::LengthMismatch {
            expected: answer.len(),
            found: guess.len(),
        });
    }

    let mut remaining: HashMap<char, usize> = HashMap::new();
    for &ch in answer {
        *remaining.entry(ch).or_insert(0) += 1;
    }

    let mut marks = vec![Mark::Absent; guess.len()];

    for (i, (&g, &a)) in guess.iter().zip(answer).enumerate() {
        if g == a {
            marks[i] = Mark::Correct;
            if let Some(count) = remaining.get_mut(&g) {
                *count = count.saturating_sub(1);
            }
        }
    }

    for (i, &g) in guess.iter().enumerate() {
        if marks[i].is_correct() {
            continue;
        }
        if let Some(count) = remaining.get_mut(&g) {
            if *count > 0 {
                marks[i] = Mark::Present;
                *count -= 1;
            }
        }
    }

    Ok(marks)
}

/// Fold a submitted row into the keyboard status.
///
/// Each letter keeps the higher-ranked of its stored and new mark; a letter
/// seen for the first time takes its mark as-is. `Unset` marks are ignored.
pub fn update_key_status(key_status: &mut KeyStatus, guess: &[char], marks: &[Mark]) {
    for (&ch, &mark) in guess.iter().zip(marks) {
        if mark == Mark::Unset {
            continue;
        }
        key_status
            .entry(ch)
            .and_modify(|current| *current = (*current).max(mark))
            .or_insert(mark);
    }
}
