//! Answering service error types

use thiserror::Error;

/// Answering exchange error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AnswerError {
    pub kind: AnswerErrorKind,
    pub message: String,
    /// HTTP status, when the service answered at all
    pub status: Option<u16>,
}

impl AnswerError {
    pub fn new(kind: AnswerErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AnswerErrorKind::Network, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(AnswerErrorKind::ServerError, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(AnswerErrorKind::Rejected, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(AnswerErrorKind::MalformedResponse, message)
    }
}

/// Error classification, used for logging and for the failure text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerErrorKind {
    /// Connection refused, DNS, timeouts, truncated bodies
    Network,
    /// 5xx from the answering service
    ServerError,
    /// Any other non-success status
    Rejected,
    /// Body was not the expected JSON shape
    MalformedResponse,
}

impl AnswerErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::ServerError => "server_error",
            Self::Rejected => "rejected",
            Self::MalformedResponse => "malformed_response",
        }
    }
}
