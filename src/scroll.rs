//! Keep the newest transcript entry in view
//!
//! The scroller only decides *when* to scroll. Rendering layers implement
//! [`ScrollTarget`]; a failed scroll is logged and forgotten.

use crate::session::Message;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("scroll failed: {0}")]
pub struct ScrollError(pub String);

/// Something with an end anchor that can be brought into view
pub trait ScrollTarget {
    fn scroll_to_end(&mut self) -> Result<(), ScrollError>;
}

/// Fires on transcript length or last-message identity changes.
#[derive(Debug, Default)]
pub struct AutoScroller {
    last_len: usize,
    last_id: Option<String>,
}

impl AutoScroller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look at the transcript and scroll if it changed since the last call.
    ///
    /// Returns whether a scroll was attempted.
    pub fn observe<T: ScrollTarget + ?Sized>(&mut self, transcript: &[Message], target: &mut T) -> bool {
        let last_id = transcript.last().map(|m| m.id.as_str());
        if transcript.len() == self.last_len && last_id == self.last_id.as_deref() {
            return false;
        }

        self.last_len = transcript.len();
        self.last_id = last_id.map(str::to_string);

        if let Err(e) = target.scroll_to_end() {
            tracing::debug!(error = %e, "Auto-scroll skipped");
        }
        true
    }
}
