//! State trait for the phases of a puzzle.
//!
//! Phases are plain values: every method is pure and inspecting a phase
//! never mutates the puzzle it was read from.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine phases.
///
/// # Required Traits
///
/// - `Clone` + `PartialEq`: phases are compared to decide legal operations
/// - `Debug`: phases show up in logs and diagnostics
/// - `Serialize` + `Deserialize`: phases travel inside persisted snapshots
///
/// # Example
///
/// ```rust
/// use wordscend::core::{AttemptPhase, State};
///
/// assert_eq!(AttemptPhase::Entering.name(), "Entering");
/// assert!(!AttemptPhase::Entering.is_final());
/// assert!(AttemptPhase::Won.is_final());
/// assert!(AttemptPhase::Lost.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name of the phase for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a terminal phase.
    ///
    /// Once a puzzle reaches a terminal phase its board and cursor are
    /// frozen. Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error phase.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum LevelState {
        Loading,
        Playing,
        Finished,
        Broken,
    }

    impl State for LevelState {
        fn name(&self) -> &str {
            match self {
                Self::Loading => "Loading",
                Self::Playing => "Playing",
                Self::Finished => "Finished",
                Self::Broken => "Broken",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Finished | Self::Broken)
        }

        fn is_error(&self) -> bool {
            matches!(self, Self::Broken)
        }
    }

    #[test]
    fn default_methods_are_false() {
        #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
        struct Only;

        impl State for Only {
            fn name(&self) -> &str {
                "Only"
            }
        }

        assert!(!Only.is_final());
        assert!(!Only.is_error());
    }

    #[test]
    fn overridden_methods_classify_states() {
        assert!(!LevelState::Loading.is_final());
        assert!(!LevelState::Playing.is_final());
        assert!(LevelState::Finished.is_final());
        assert!(LevelState::Broken.is_final());
        assert!(LevelState::Broken.is_error());
        assert!(!LevelState::Finished.is_error());
        assert_eq!(LevelState::Playing.name(), "Playing");
    }

    #[test]
    fn state_serializes_correctly() {
        let json = serde_json::to_string(&LevelState::Playing).unwrap();
        let back: LevelState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LevelState::Playing);
    }
}
