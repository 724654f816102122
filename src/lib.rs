//! Askdesk - conversational document Q&A widget controller
//!
//! The session controller behind a chat-style question box: a pure
//! state machine decides what a submitted query does to the transcript,
//! and a small runtime executes the resulting effects against an
//! answering service.

pub mod answer;
pub mod config;
pub mod ingest;
pub mod prompts;
pub mod runtime;
pub mod sanitize;
pub mod scroll;
pub mod session;

#[cfg(test)]
mod test_support;

pub use answer::{AnswerService, AskParams, HttpAnswerService, LoggingService, Outcome};
pub use config::WidgetConfig;
pub use runtime::{SessionHandle, ViewEvent};
pub use session::{Message, Role, SessionSnapshot, SessionState, Source, Usage};
