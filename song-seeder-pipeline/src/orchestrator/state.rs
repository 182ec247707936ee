//! Run state machine.
//!
//! ```text
//! Idle → Connecting → Connected → Submitting → Done
//!                   ↘ ConnectFailed          ↘ Aborted
//! ```
//!
//! `Connected` may also go straight to `Aborted` when index bootstrap fails.

/// The state of a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Connecting,
    Connected,
    ConnectFailed,
    Submitting,
    Done,
    Aborted,
}

impl RunState {
    /// Whether the run can no longer change state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::ConnectFailed | Self::Done | Self::Aborted)
    }

    /// Process exit status for a terminal state.
    pub fn exit_code(self) -> Option<i32> {
        match self {
            Self::Done => Some(0),
            Self::ConnectFailed | Self::Aborted => Some(1),
            _ => None,
        }
    }

    /// Whether `next` is a legal successor of this state.
    pub fn can_transition_to(self, next: RunState) -> bool {
        use RunState::*;
        matches!(
            (self, next),
            (Idle, Connecting)
                | (Connecting, Connected)
                | (Connecting, ConnectFailed)
                | (Connected, Submitting)
                | (Connected, Aborted)
                | (Submitting, Done)
                | (Submitting, Aborted)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::RunState::*;
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let path = [Idle, Connecting, Connected, Submitting, Done];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_terminal_states() {
        for state in [ConnectFailed, Done, Aborted] {
            assert!(state.is_terminal());
            for next in [Idle, Connecting, Connected, Submitting, Done, Aborted] {
                assert!(!state.can_transition_to(next));
            }
        }
        assert!(!Submitting.is_terminal());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Done.exit_code(), Some(0));
        assert_eq!(ConnectFailed.exit_code(), Some(1));
        assert_eq!(Aborted.exit_code(), Some(1));
        assert_eq!(Submitting.exit_code(), None);
    }

    #[test]
    fn test_cannot_skip_connecting() {
        assert!(!Idle.can_transition_to(Submitting));
        assert!(!Connecting.can_transition_to(Submitting));
    }
}
