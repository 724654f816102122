//! HTTP answering service

use super::{AnswerError, AnswerResponse, AnswerService, AskRequest};
use crate::config::WidgetConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Longest slice of an error body carried into a message
const MAX_ERROR_DETAIL_CHARS: usize = 200;

/// Answering service reached over HTTP with a JSON body
pub struct HttpAnswerService {
    client: Client,
    url: String,
}

impl HttpAnswerService {
    pub fn new(config: &WidgetConfig) -> Result<Self, AnswerError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AnswerError::network(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self::with_client(client, config.answer_url()))
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    fn classify_error(status: StatusCode, body: &str) -> AnswerError {
        let detail = error_detail(body);
        let message = match detail {
            Some(detail) => format!("HTTP {}: {detail}", status.as_u16()),
            None => format!("HTTP {status}"),
        };

        let err = if status.is_server_error() {
            AnswerError::server_error(format!("Server error ({message})"))
        } else {
            AnswerError::rejected(format!("Request rejected ({message})"))
        };
        err.with_status(status.as_u16())
    }
}

/// Pull a readable reason out of an error body, if there is one
fn error_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(trimmed) {
        let from_json = parsed
            .get("error")
            .and_then(|e| e.get("message").or(Some(e)))
            .or_else(|| parsed.get("detail"))
            .or_else(|| parsed.get("message"))
            .and_then(serde_json::Value::as_str);
        if let Some(text) = from_json {
            return Some(truncate(text));
        }
    }

    Some(truncate(trimmed))
}

fn truncate(text: &str) -> String {
    if text.chars().count() > MAX_ERROR_DETAIL_CHARS {
        let mut cut: String = text.chars().take(MAX_ERROR_DETAIL_CHARS).collect();
        cut.push('…');
        cut
    } else {
        text.to_string()
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    async fn answer(&self, request: &AskRequest) -> Result<AnswerResponse, AnswerError> {
        tracing::debug!(url = %self.url, query_len = request.query.len(), "Sending answer request");

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnswerError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    AnswerError::network(format!("Connection failed: {e}"))
                } else {
                    AnswerError::network(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnswerError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_error(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| AnswerError::malformed(format!("Failed to parse response: {e}")))
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
