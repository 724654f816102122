//! Events that can occur in a session

use crate::answer::Outcome;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    /// Raw text from the input box or a suggested prompt
    Submit { text: String },
    /// The input box changed; touches only the draft buffer
    InputChanged { text: String },

    // Exchange events
    ExchangeComplete { outcome: Outcome },
}

impl Event {
    pub fn submit(text: impl Into<String>) -> Self {
        Event::Submit { text: text.into() }
    }

    pub fn complete(outcome: Outcome) -> Self {
        Event::ExchangeComplete { outcome }
    }
}
