//! Query normalization
//!
//! Every query, typed or suggested, passes through [`sanitize`] before it
//! reaches the session state machine.

/// Collapse every whitespace run (newlines included) into one ASCII space
/// and trim both ends.
pub fn sanitize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
