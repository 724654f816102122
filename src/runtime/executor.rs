//! Session runtime executor

use super::ViewEvent;
use crate::answer::{self, AnswerService, AskParams, Outcome};
use crate::session::{transition, Effect, Event, Session, SessionSnapshot, TransitionError};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};

/// Owns one session and applies the effects its transitions produce
pub struct SessionRuntime<A>
where
    A: AnswerService + 'static,
{
    session: Session,
    params: AskParams,
    answer_service: Arc<A>,
    event_rx: mpsc::Receiver<Event>,
    /// Weak so that dropping every handle stops the loop
    event_tx: mpsc::WeakSender<Event>,
    view_tx: broadcast::Sender<ViewEvent>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
    /// Transcript length at the last view notification
    notified_len: usize,
}

impl<A> SessionRuntime<A>
where
    A: AnswerService + 'static,
{
    pub fn new(
        session: Session,
        params: AskParams,
        answer_service: A,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::WeakSender<Event>,
        view_tx: broadcast::Sender<ViewEvent>,
        snapshot_tx: watch::Sender<SessionSnapshot>,
    ) -> Self {
        let notified_len = session.transcript().len();
        Self {
            session,
            params,
            answer_service: Arc::new(answer_service),
            event_rx,
            event_tx,
            view_tx,
            snapshot_tx,
            notified_len,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(
            session_id = %self.session.id(),
            endpoint = %self.answer_service.endpoint(),
            "Starting session runtime"
        );

        while let Some(event) = self.event_rx.recv().await {
            self.process_event(event);
        }

        if self.session.state().is_awaiting_response() {
            // The exchange task finishes on its own; its result has nowhere to go.
            tracing::debug!(session_id = %self.session.id(), "Stopping with an answer outstanding");
        }
        tracing::info!(session_id = %self.session.id(), "Session runtime stopped");
    }

    fn process_event(&mut self, event: Event) {
        // Pure state transition
        let result = match transition(&self.session.state(), event) {
            Ok(r) => r,
            Err(TransitionError::NoExchangeOutstanding) => {
                tracing::warn!(session_id = %self.session.id(), "Ignoring stray exchange completion");
                return;
            }
            Err(e) => {
                // Silent for the user; the view already shows why
                tracing::debug!(session_id = %self.session.id(), reason = %e, "Submission dropped");
                return;
            }
        };

        let old_state = self.session.state();
        self.session.set_state(result.new_state);
        if old_state != result.new_state {
            tracing::debug!(
                session_id = %self.session.id(),
                from = ?old_state,
                to = ?result.new_state,
                "Session state changed"
            );
        }

        let mut notify = false;
        for effect in result.effects {
            notify |= self.execute_effect(effect);
        }

        self.snapshot_tx.send_replace(self.session.snapshot());
        if notify {
            self.notify_view(old_state.is_awaiting_response());
        }
    }

    /// Returns true when the view should be notified after this batch.
    fn execute_effect(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::AppendMessage { draft } => {
                let session_id = self.session.id().to_string();
                let message = self.session.append(draft);
                tracing::info!(
                    session_id = %session_id,
                    message_id = %message.id,
                    role = ?message.role,
                    sources = message.sources.len(),
                    "Message appended"
                );
                false
            }
            Effect::SetPendingInput { text } => {
                self.session.set_pending_input(text);
                false
            }
            Effect::RequestAnswer { query } => {
                self.spawn_exchange(query);
                false
            }
            Effect::NotifyView => true,
        }
    }

    fn notify_view(&mut self, was_awaiting: bool) {
        let transcript = self.session.transcript();
        if transcript.len() != self.notified_len {
            self.notified_len = transcript.len();
            let _ = self.view_tx.send(ViewEvent::TranscriptChanged {
                transcript: transcript.to_vec(),
            });
        }

        let awaiting_response = self.session.state().is_awaiting_response();
        if awaiting_response != was_awaiting {
            let _ = self.view_tx.send(ViewEvent::StateChanged { awaiting_response });
        }
    }

    /// Spawn the exchange as a background task; completion comes back as an event.
    fn spawn_exchange(&self, query: String) {
        let service = Arc::clone(&self.answer_service);
        let params = self.params.clone();
        let event_tx = self.event_tx.clone();
        let session_id = self.session.id().to_string();

        tokio::spawn(async move {
            tracing::info!(session_id = %session_id, query_len = query.len(), "Requesting answer (background)");
            let outcome = answer::ask(&*service, &query, &params).await;

            if let Outcome::Failed { description } = &outcome {
                tracing::warn!(session_id = %session_id, error = %description, "Exchange failed");
            }

            let Some(event_tx) = event_tx.upgrade() else {
                tracing::debug!(session_id = %session_id, "Session closed; discarding answer");
                return;
            };
            if event_tx.send(Event::complete(outcome)).await.is_err() {
                tracing::debug!(session_id = %session_id, "Session closed; discarding answer");
            }
        });
    }
}
