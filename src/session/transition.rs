//! Pure state transition function

use super::{Effect, Event, MessageDraft, SessionState};
use crate::answer::Outcome;
use crate::sanitize::sanitize;
use thiserror::Error;

/// Prefix for the assistant message that reports a failed exchange
pub const FAILURE_PREFIX: &str = "Sorry, something went wrong";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Events the machine declines; none of them change the session
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Query is empty after sanitizing")]
    EmptyQuery,
    #[error("An answer is still pending; submission dropped")]
    ConcurrentSubmitRejected,
    #[error("Exchange completed with no request outstanding")]
    NoExchangeOutstanding,
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs; ids, clocks
/// and I/O live in the runtime.
pub fn transition(state: &SessionState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Draft edits never touch the transcript or the gate
        (_, Event::InputChanged { text }) => {
            Ok(TransitionResult::new(*state).with_effect(Effect::SetPendingInput { text }))
        }

        (_, Event::Submit { text }) => {
            let query = sanitize(&text);
            if query.is_empty() {
                return Err(TransitionError::EmptyQuery);
            }
            if state.is_awaiting_response() {
                return Err(TransitionError::ConcurrentSubmitRejected);
            }

            Ok(TransitionResult::new(SessionState::AwaitingResponse)
                .with_effect(Effect::append_user(query.clone()))
                .with_effect(Effect::clear_pending_input())
                .with_effect(Effect::NotifyView)
                .with_effect(Effect::RequestAnswer { query }))
        }

        // Success or failure, the gate always reopens
        (SessionState::AwaitingResponse, Event::ExchangeComplete { outcome }) => {
            Ok(TransitionResult::new(SessionState::Idle)
                .with_effect(Effect::AppendMessage {
                    draft: assistant_draft(outcome),
                })
                .with_effect(Effect::NotifyView))
        }

        (SessionState::Idle, Event::ExchangeComplete { .. }) => {
            Err(TransitionError::NoExchangeOutstanding)
        }
    }
}

fn assistant_draft(outcome: Outcome) -> MessageDraft {
    match outcome {
        Outcome::Answered {
            content,
            sources,
            usage,
        } => MessageDraft::assistant(content, sources, Some(usage)),
        Outcome::Failed { description } => {
            let description = description.trim();
            let content = if description.is_empty() {
                format!("{FAILURE_PREFIX}.")
            } else {
                format!("{FAILURE_PREFIX}: {description}")
            };
            MessageDraft::assistant(content, vec![], None)
        }
    }
}
