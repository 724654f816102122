//! Property-based tests for the session state machine
//!
//! Random event sequences are driven through `transition` and the effects
//! applied to a real `Session`, the same way the runtime does it.

use super::*;
use crate::answer::{Outcome, Source, Usage};
use proptest::prelude::*;
use std::collections::HashSet;

// ============================================================================
// Harness
// ============================================================================

#[derive(Default)]
struct Harness {
    session: Session,
    /// Queries handed to the answering service, in order
    requested: Vec<String>,
    outstanding: usize,
    max_outstanding: usize,
}

impl Harness {
    fn apply(&mut self, event: Event) -> Result<(), TransitionError> {
        let result = transition(&self.session.state(), event)?;
        self.session.set_state(result.new_state);

        for effect in result.effects {
            match effect {
                Effect::AppendMessage { draft } => {
                    if draft.role == Role::Assistant {
                        self.outstanding -= 1;
                    }
                    self.session.append(draft);
                }
                Effect::SetPendingInput { text } => self.session.set_pending_input(text),
                Effect::RequestAnswer { query } => {
                    self.outstanding += 1;
                    self.max_outstanding = self.max_outstanding.max(self.outstanding);
                    self.requested.push(query);
                }
                Effect::NotifyView => {}
            }
        }
        Ok(())
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_source() -> impl Strategy<Value = Source> {
    (
        "[A-Za-z ]{1,20}",
        proptest::option::of("https://[a-z]{3,8}\\.example/[a-z]{1,6}"),
        proptest::option::of("[a-z ]{0,30}"),
    )
        .prop_map(|(title, url, snippet)| Source {
            title,
            url,
            snippet,
        })
}

fn arb_outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        (
            "[a-zA-Z0-9 .]{0,40}",
            proptest::collection::vec(arb_source(), 0..4),
            proptest::option::of(0u64..5000),
        )
            .prop_map(|(content, sources, total)| Outcome::Answered {
                content,
                sources,
                usage: Usage {
                    total_tokens: total,
                    ..Usage::default()
                },
            }),
        "[a-zA-Z ]{0,30}".prop_map(|description| Outcome::Failed { description }),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        3 => "[ \\t\\na-z]{0,24}".prop_map(|text| Event::Submit { text }),
        3 => arb_outcome().prop_map(|outcome| Event::ExchangeComplete { outcome }),
        1 => "[a-z ]{0,10}".prop_map(|text| Event::InputChanged { text }),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_single_flight(events in proptest::collection::vec(arb_event(), 0..60)) {
        let mut h = Harness::default();
        for event in events {
            let _ = h.apply(event);
            prop_assert_eq!(h.session.state().is_awaiting_response(), h.outstanding == 1);
        }
        prop_assert!(h.max_outstanding <= 1);
    }

    #[test]
    fn prop_turns_alternate(events in proptest::collection::vec(arb_event(), 0..60)) {
        let mut h = Harness::default();
        for event in events {
            let _ = h.apply(event);
        }

        let transcript = h.session.transcript();
        for (i, message) in transcript.iter().enumerate() {
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            prop_assert_eq!(message.role, expected);
        }
        // An odd-length transcript means one answer is still outstanding
        prop_assert_eq!(transcript.len() % 2 == 1, h.session.state().is_awaiting_response());
    }

    #[test]
    fn prop_transcript_only_grows(events in proptest::collection::vec(arb_event(), 0..60)) {
        let mut h = Harness::default();
        let mut previous: Vec<String> = vec![];
        for event in events {
            let _ = h.apply(event);
            let ids: Vec<String> = h.session.transcript().iter().map(|m| m.id.clone()).collect();
            prop_assert!(ids.len() >= previous.len());
            prop_assert_eq!(&ids[..previous.len()], &previous[..]);
            previous = ids;
        }
        let unique: HashSet<_> = previous.iter().collect();
        prop_assert_eq!(unique.len(), previous.len());
    }

    #[test]
    fn prop_user_messages_are_sanitized_queries(events in proptest::collection::vec(arb_event(), 0..60)) {
        let mut h = Harness::default();
        for event in events {
            let _ = h.apply(event);
        }

        let user_contents: Vec<&str> = h
            .session
            .transcript()
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .collect();
        let requested: Vec<&str> = h.requested.iter().map(String::as_str).collect();
        prop_assert_eq!(user_contents, requested);
        for query in &h.requested {
            prop_assert!(!query.is_empty());
            prop_assert_eq!(crate::sanitize::sanitize(query), query.clone());
        }
    }

    #[test]
    fn prop_assistant_messages_never_empty_on_failure(
        query in "[a-z]{1,10}",
        description in "[ a-z]{0,20}",
    ) {
        let mut h = Harness::default();
        h.apply(Event::Submit { text: query }).unwrap();
        h.apply(Event::ExchangeComplete { outcome: Outcome::Failed { description } }).unwrap();

        let last = h.session.transcript().last().unwrap();
        prop_assert_eq!(last.role, Role::Assistant);
        prop_assert!(!last.content.is_empty());
        prop_assert_eq!(h.session.state(), SessionState::Idle);
    }

    #[test]
    fn prop_rejections_leave_session_untouched(
        text in "[ \\t\\na-z]{0,12}",
        awaiting in any::<bool>(),
    ) {
        let state = if awaiting { SessionState::AwaitingResponse } else { SessionState::Idle };
        match transition(&state, Event::Submit { text: text.clone() }) {
            Ok(result) => {
                prop_assert!(!awaiting);
                prop_assert!(!crate::sanitize::sanitize(&text).is_empty());
                prop_assert_eq!(result.new_state, SessionState::AwaitingResponse);
            }
            Err(TransitionError::EmptyQuery) => {
                prop_assert!(crate::sanitize::sanitize(&text).is_empty());
            }
            Err(TransitionError::ConcurrentSubmitRejected) => prop_assert!(awaiting),
            Err(TransitionError::NoExchangeOutstanding) => prop_assert!(false, "not a submit error"),
        }
    }
}
