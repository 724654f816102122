//! Runtime for executing sessions
//!
//! One tokio task owns the [`Session`] and consumes events; views talk to
//! it through a cloneable [`SessionHandle`].

mod executor;


pub use executor::SessionRuntime;

use crate::answer::{AnswerService, AskParams};
use crate::prompts::{self, SuggestedPrompt};
use crate::session::{Event, Message, Session, SessionSnapshot};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch};

const EVENT_BUFFER: usize = 32;
const VIEW_BUFFER: usize = 128;

/// Events pushed to view subscribers
#[derive(Debug, Clone)]
pub enum ViewEvent {
    TranscriptChanged { transcript: Vec<Message> },
    StateChanged { awaiting_response: bool },
}

#[derive(Debug, Error)]
#[error("Session runtime has stopped")]
pub struct SessionClosed;

/// Handle to interact with a running session
#[derive(Clone)]
pub struct SessionHandle {
    session_id: String,
    event_tx: mpsc::Sender<Event>,
    view_tx: broadcast::Sender<ViewEvent>,
    snapshot_rx: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Mount a fresh session and start its runtime on the current tokio runtime.
    ///
    /// The runtime stops once every handle is dropped.
    pub fn spawn<A: AnswerService + 'static>(answer_service: A, params: AskParams) -> Self {
        let session = Session::new();
        let session_id = session.id().to_string();

        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let (view_tx, _) = broadcast::channel(VIEW_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());

        let runtime = SessionRuntime::new(
            session,
            params,
            answer_service,
            event_rx,
            event_tx.downgrade(),
            view_tx.clone(),
            snapshot_tx,
        );

        let id = session_id.clone();
        tokio::spawn(async move {
            runtime.run().await;
            tracing::info!(session_id = %id, "Session runtime finished");
        });

        Self {
            session_id,
            event_tx,
            view_tx,
            snapshot_rx,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Submit raw text. Blank queries and submits while an answer is
    /// pending are dropped by the state machine.
    pub async fn submit(&self, raw: impl Into<String>) -> Result<(), SessionClosed> {
        self.send(Event::submit(raw)).await
    }

    pub async fn set_pending_input(&self, text: impl Into<String>) -> Result<(), SessionClosed> {
        self.send(Event::InputChanged { text: text.into() }).await
    }

    /// Submit suggested prompt `index` exactly as if it had been typed.
    pub async fn activate_prompt(
        &self,
        index: usize,
    ) -> Result<Option<&'static SuggestedPrompt>, SessionClosed> {
        let Some(prompt) = prompts::get(index) else {
            return Ok(None);
        };
        self.submit(prompt.text).await?;
        Ok(Some(prompt))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.view_tx.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Wait until the session reaches a snapshot matching `predicate`.
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&SessionSnapshot) -> bool,
    ) -> Result<SessionSnapshot, SessionClosed> {
        let mut rx = self.snapshot_rx.clone();
        let snapshot = rx
            .wait_for(|snapshot| predicate(snapshot))
            .await
            .map_err(|_| SessionClosed)?;
        Ok(snapshot.clone())
    }

    async fn send(&self, event: Event) -> Result<(), SessionClosed> {
        self.event_tx.send(event).await.map_err(|_| SessionClosed)
    }
}
