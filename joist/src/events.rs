//! Event handling result types.

/// Result of handling an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Interaction was ignored, try other handlers.
    Ignored,
    /// Interaction was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the interaction was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

impl From<bool> for EventResult {
    fn from(handled: bool) -> Self {
        if handled {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}
