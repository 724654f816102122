//! Session state types

use crate::answer::{Source, Usage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Single-flight gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionState {
    /// Ready for a query
    #[default]
    Idle,

    /// One exchange outstanding; further submits are dropped
    AwaitingResponse,
}

impl SessionState {
    pub fn is_awaiting_response(self) -> bool {
        matches!(self, SessionState::AwaitingResponse)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    /// Citations, assistant only
    pub sources: Vec<Source>,
    /// Token accounting, assistant only
    pub usage: Option<Usage>,
    pub timestamp: DateTime<Utc>,
}

/// A message before the session assigns its id and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub role: Role,
    pub content: String,
    pub sources: Vec<Source>,
    pub usage: Option<Usage>,
}

impl MessageDraft {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            sources: vec![],
            usage: None,
        }
    }

    pub fn assistant(content: impl Into<String>, sources: Vec<Source>, usage: Option<Usage>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            sources,
            usage,
        }
    }
}

/// Read-only view of a session, handed to renderers
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub transcript: Vec<Message>,
    pub pending_input: String,
    pub awaiting_response: bool,
}

/// Controller state for one conversation
///
/// Owned by exactly one runtime; the transcript only ever grows.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    state: SessionState,
    transcript: Vec<Message>,
    pending_input: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            state: SessionState::Idle,
            transcript: Vec::new(),
            pending_input: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            transcript: self.transcript.clone(),
            pending_input: self.pending_input.clone(),
            awaiting_response: self.state.is_awaiting_response(),
        }
    }

    pub(crate) fn set_state(&mut self, state: SessionState) {
        self.state = state;
    }

    pub(crate) fn set_pending_input(&mut self, text: String) {
        self.pending_input = text;
    }

    /// Assign id and timestamp, then append.
    pub(crate) fn append(&mut self, draft: MessageDraft) -> &Message {
        let now = Utc::now();
        // Wall clock may step backwards; keep timestamps non-decreasing.
        let timestamp = self
            .transcript
            .last()
            .map_or(now, |last| last.timestamp.max(now));

        self.transcript.push(Message {
            id: uuid::Uuid::new_v4().to_string(),
            role: draft.role,
            content: draft.content,
            sources: draft.sources,
            usage: draft.usage,
            timestamp,
        });
        &self.transcript[self.transcript.len() - 1]
    }
}
