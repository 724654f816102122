//! Conversation session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! [`transition`] turns a state and an event into a new state plus
//! effects, and the runtime applies those effects to the owned [`Session`].

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use crate::answer::{Source, Usage};
pub use effect::Effect;
pub use event::Event;
pub use state::{Message, MessageDraft, Role, Session, SessionSnapshot, SessionState};
pub use transition::{transition, TransitionError, TransitionResult};
