/// Lifecycle of a tracking session.
///
/// `Opening -> Probing -> Streaming -> Draining -> {Done, Failed}`; failures
/// while opening or probing go straight to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Acquiring the frame source
    #[default]
    Opening,
    /// Reading the first frame to fix orientation and output size
    Probing,
    /// Processing frames until end of stream or a fault
    Streaming,
    /// Releasing source and sink
    Draining,
    /// Completed after a clean end of stream
    Done,
    /// Terminated by an error
    Failed,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Opening, Probing)
                | (Opening, Failed)
                | (Probing, Streaming)
                | (Probing, Failed)
                | (Streaming, Draining)
                | (Draining, Done)
                | (Draining, Failed)
        )
    }
}
