//! Widget configuration
//!
//! Endpoint location and HTTP timeout come from the environment. Model and
//! `topK` are fixed (see [`crate::answer::DEFAULT_MODEL`]).

use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

const ANSWER_PATH: &str = "/api/ask";
const INGEST_PATH: &str = "/api/ingest";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ASKDESK_API_URL is not a valid http(s) URL: {0}")]
    InvalidApiUrl(String),
}

/// Configuration for the backend collaborators
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Base URL, without trailing slash
    pub api_base: String,
    pub timeout: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl WidgetConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base = lookup("ASKDESK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_base = api_base.trim().trim_end_matches('/').to_string();

        match Url::parse(&api_base) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ConfigError::InvalidApiUrl(api_base)),
        }

        let timeout_secs = lookup("ASKDESK_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_base,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn answer_url(&self) -> String {
        format!("{}{ANSWER_PATH}", self.api_base)
    }

    pub fn ingest_url(&self) -> String {
        format!("{}{INGEST_PATH}", self.api_base)
    }
}
