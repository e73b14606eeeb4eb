//! Worker lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states of an offline cache worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerState {
    /// Registered; no handler has run yet.
    #[default]
    Parsed,
    /// Install handler running.
    Installing,
    /// Installed, waiting to activate.
    Installed,
    /// Activate handler running.
    Activating,
    /// Active and controlling pages.
    Activated,
    /// Replaced by a newer generation.
    Redundant,
}

impl WorkerState {
    /// Whether the state machine allows moving to `next`.
    ///
    /// Handler failures back out to the previous settled state; any state
    /// may become `Redundant`.
    pub fn can_transition_to(self, next: WorkerState) -> bool {
        use WorkerState::*;
        next == Redundant
            || matches!(
                (self, next),
                (Parsed, Installing)
                    | (Installing, Installed)
                    | (Installing, Parsed)
                    | (Installed, Activating)
                    | (Activating, Installed)
                    | (Activating, Activated)
            )
    }

    /// Whether the worker is active and controlling pages.
    pub fn is_active(self) -> bool {
        self == WorkerState::Activated
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkerState::Parsed => "parsed",
            WorkerState::Installing => "installing",
            WorkerState::Installed => "installed",
            WorkerState::Activating => "activating",
            WorkerState::Activated => "activated",
            WorkerState::Redundant => "redundant",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        assert!(WorkerState::Parsed.can_transition_to(WorkerState::Installing));
        assert!(WorkerState::Installing.can_transition_to(WorkerState::Installed));
        assert!(WorkerState::Installed.can_transition_to(WorkerState::Activating));
        assert!(WorkerState::Activating.can_transition_to(WorkerState::Activated));
    }

    #[test]
    fn test_failure_transitions_back_out() {
        assert!(WorkerState::Installing.can_transition_to(WorkerState::Parsed));
        assert!(WorkerState::Activating.can_transition_to(WorkerState::Installed));
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        assert!(!WorkerState::Parsed.can_transition_to(WorkerState::Activated));
        assert!(!WorkerState::Activated.can_transition_to(WorkerState::Installing));
        assert!(!WorkerState::Installed.can_transition_to(WorkerState::Installed));
    }

    #[test]
    fn test_any_state_can_become_redundant() {
        for state in [
            WorkerState::Parsed,
            WorkerState::Installing,
            WorkerState::Installed,
            WorkerState::Activating,
            WorkerState::Activated,
        ] {
            assert!(state.can_transition_to(WorkerState::Redundant));
        }
    }

    #[test]
    fn test_only_activated_is_active() {
        assert!(WorkerState::Activated.is_active());
        assert!(!WorkerState::Installed.is_active());
        assert_eq!(WorkerState::default(), WorkerState::Parsed);
    }
}
