//! Phases of a single puzzle.

crate::state_enum! {
    /// Lifecycle of one puzzle: letters are entered until a row matches the
    /// answer (`Won`) or the last row is spent (`Lost`).
    #[derive(Copy, Eq)]
    pub enum AttemptPhase {
        Entering,
        Won,
        Lost,
    }
    final: [Won, Lost]
}

impl AttemptPhase {
    /// Phase implied by the `done`/`win` flags of a puzzle.
    #[must_use]
    pub const fn from_flags(done: bool, win: bool) -> Self {
        match (done, win) {
            (false, _) => Self::Entering,
            (true, true) => Self::Won,
            (true, false) => Self::Lost,
        }
    }
}
