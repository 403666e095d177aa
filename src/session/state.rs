/// Session lifecycle.
///
/// Transitions are monotonic: `Uninitialized → Active → Finalizing → Closed`,
/// with `Failed` reachable from any non-terminal state. A session never
/// returns to an earlier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Stream open, no setup event received yet.
    Uninitialized,
    /// Setup confirmed; audio and markers accepted.
    Active,
    /// Client half-closed; draining audio and producing final results.
    Finalizing,
    /// Terminal, normal end.
    Closed,
    /// Terminal, after a protocol violation.
    Failed,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Closed | SessionState::Failed)
    }

    /// Whether moving to `next` respects the monotonic lifecycle.
    pub fn can_transition_to(self, next: SessionState) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            SessionState::Uninitialized => false,
            SessionState::Active => self == SessionState::Uninitialized,
            SessionState::Finalizing => self == SessionState::Active,
            SessionState::Closed => true,
            SessionState::Failed => true,
        }
    }
}
