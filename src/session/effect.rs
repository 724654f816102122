//! Effects produced by state transitions

use super::state::MessageDraft;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a message to the transcript
    AppendMessage { draft: MessageDraft },

    /// Replace the draft buffer
    SetPendingInput { text: String },

    /// Start the one exchange for this turn
    RequestAnswer { query: String },

    /// Push a fresh snapshot to view subscribers
    NotifyView,
}

impl Effect {
    pub fn append_user(query: impl Into<String>) -> Self {
        Effect::AppendMessage {
            draft: MessageDraft::user(query),
        }
    }

    pub fn clear_pending_input() -> Self {
        Effect::SetPendingInput {
            text: String::new(),
        }
    }
}
