//! Deterministic daily answer selection.

use crate::ledger::DayKey;

/// Chooses the answer for a day from a candidate list.
///
/// Must be deterministic for a given `(candidates, day)` so every player
/// sees the same puzzle on the same day.
pub trait AnswerPicker {
    fn pick<'a>(&self, candidates: &'a [String], day: DayKey) -> Option<&'a str>;
}

/// FNV-1a hash of the unpadded day key, modulo the candidate count.
///
/// The multiply wraps at 32 bits. Ports that multiply in 64-bit floats
/// lose precision above 2^53, so their picks for a given day differ from
/// these.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailyPicker;

const FNV_OFFSET: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

impl DailyPicker {
    fn hash(key: &str) -> u32 {
        key.bytes()
            .fold(FNV_OFFSET, |h, b| (h ^ u32::from(b)).wrapping_mul(FNV_PRIME))
    }
}

impl AnswerPicker for DailyPicker {
    fn pick<'a>(&self, candidates: &'a [String], day: DayKey) -> Option<&'a str> {
        if candidates.is_empty() {
            return None;
        }
        let idx = Self::hash(&day.unpadded()) as usize % candidates.len();
        candidates.get(idx).map(String::as_str)
    }
}
