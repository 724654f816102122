//! Answering service abstraction
//!
//! One exchange per submitted query: the session hands a sanitized query
//! to [`ask`], which always resolves to an [`Outcome`].

mod error;
mod http;
mod types;

pub use error::{AnswerError, AnswerErrorKind};
pub use http::HttpAnswerService;
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for answering backends
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Perform a single exchange
    async fn answer(&self, request: &AskRequest) -> Result<AnswerResponse, AnswerError>;

    /// Where requests go, for logging
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<T: AnswerService + ?Sized> AnswerService for Arc<T> {
    async fn answer(&self, request: &AskRequest) -> Result<AnswerResponse, AnswerError> {
        (**self).answer(request).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

/// Run one exchange and fold every failure into [`Outcome::Failed`].
///
/// Never retries.
pub async fn ask<S: AnswerService + ?Sized>(service: &S, query: &str, params: &AskParams) -> Outcome {
    let request = AskRequest::new(query, params);
    service.answer(&request).await.into()
}

/// Logging wrapper for answering services
pub struct LoggingService {
    inner: Arc<dyn AnswerService>,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn AnswerService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl AnswerService for LoggingService {
    async fn answer(&self, request: &AskRequest) -> Result<AnswerResponse, AnswerError> {
        let start = std::time::Instant::now();
        let result = self.inner.answer(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    endpoint = %self.inner.endpoint(),
                    model = %request.model,
                    top_k = request.top_k,
                    duration_ms = %duration.as_millis(),
                    sources = response.sources.as_ref().map_or(0, Vec::len),
                    total_tokens = response.usage.as_ref().and_then(|u| u.total_tokens),
                    "Answer received"
                );
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    kind = e.kind.as_str(),
                    status = e.status,
                    error = %e.message,
                    "Answer request failed"
                );
            }
        }

        result
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}
