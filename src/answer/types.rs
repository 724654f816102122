//! Wire and result types for the answering exchange

use super::AnswerError;
use serde::{Deserialize, Serialize};

/// Model requested from the answering service
pub const DEFAULT_MODEL: &str = "gpt-5-thinking";

/// Number of retrieved passages the service should ground on
pub const DEFAULT_TOP_K: u32 = 5;

/// Shown when the service answers without any text
pub const EMPTY_ANSWER_PLACEHOLDER: &str = "(empty response)";

/// Per-exchange parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskParams {
    pub top_k: u32,
    pub model: String,
}

impl Default for AskParams {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Request body sent to the answering endpoint
///
/// No `lang` field is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    pub query: String,
    pub top_k: u32,
    pub model: String,
}

impl AskRequest {
    pub fn new(query: impl Into<String>, params: &AskParams) -> Self {
        Self {
            query: query.into(),
            top_k: params.top_k,
            model: params.model.clone(),
        }
    }
}

/// A citation attached to an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl Source {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: None,
            snippet: None,
        }
    }
}

/// Token accounting reported by the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: Option<u64>,
    #[serde(default)]
    pub completion_tokens: Option<u64>,
    #[serde(default)]
    pub total_tokens: Option<u64>,
}

impl Usage {
    pub fn is_empty(&self) -> bool {
        self.prompt_tokens.is_none() && self.completion_tokens.is_none() && self.total_tokens.is_none()
    }
}

/// Response body from the answering endpoint; every field may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnswerResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub sources: Option<Vec<Source>>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Result of one exchange, as consumed by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Answered {
        content: String,
        sources: Vec<Source>,
        usage: Usage,
    },
    Failed {
        description: String,
    },
}

impl Outcome {
    pub fn failed(description: impl Into<String>) -> Self {
        Outcome::Failed {
            description: description.into(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

impl From<AnswerResponse> for Outcome {
    fn from(response: AnswerResponse) -> Self {
        Outcome::Answered {
            content: response
                .answer
                .unwrap_or_else(|| EMPTY_ANSWER_PLACEHOLDER.to_string()),
            sources: response.sources.unwrap_or_default(),
            usage: response.usage.unwrap_or_default(),
        }
    }
}

impl From<Result<AnswerResponse, AnswerError>> for Outcome {
    fn from(result: Result<AnswerResponse, AnswerError>) -> Self {
        match result {
            Ok(response) => response.into(),
            Err(e) => Outcome::failed(e.message),
        }
    }
}
