//! Document ingestion client
//!
//! Uploads a batch of files to the ingestion endpoint as one multipart
//! request. Not part of the session state machine: the transcript never
//! records uploads.

use crate::config::WidgetConfig;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Multipart field every file is sent under
const FILES_FIELD: &str = "files";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("No files to upload")]
    NoFiles,
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Upload failed: {0}")]
    Transport(String),
    #[error("Ingestion service returned HTTP {status}")]
    Status { status: u16 },
    #[error("Failed to parse ingestion response: {0}")]
    Malformed(String),
}

/// Response from the ingestion endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct IngestResponse {
    /// Number of documents indexed
    pub count: u64,
}

pub struct IngestClient {
    client: Client,
    url: String,
}

impl IngestClient {
    pub fn new(config: &WidgetConfig) -> Result<Self, IngestError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| IngestError::Transport(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self::with_client(client, config.ingest_url()))
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub async fn upload(&self, paths: &[PathBuf]) -> Result<IngestResponse, IngestError> {
        if paths.is_empty() {
            return Err(IngestError::NoFiles);
        }

        let mut form = Form::new();
        for path in paths {
            form = form.part(FILES_FIELD, file_part(path).await?);
        }

        let start = std::time::Instant::now();
        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| IngestError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), files = paths.len(), "Ingestion rejected");
            return Err(IngestError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| IngestError::Transport(format!("Failed to read response: {e}")))?;
        let parsed: IngestResponse =
            serde_json::from_str(&body).map_err(|e| IngestError::Malformed(e.to_string()))?;

        tracing::info!(
            files = paths.len(),
            indexed = parsed.count,
            duration_ms = %start.elapsed().as_millis(),
            "Documents ingested"
        );
        Ok(parsed)
    }
}

async fn file_part(path: &Path) -> Result<Part, IngestError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime.essence_str())
        .map_err(|e| IngestError::Transport(e.to_string()))
}
