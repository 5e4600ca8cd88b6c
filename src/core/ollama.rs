//! Shared HTTP client for the Ollama API.
//!
//! Both collaborators (embeddings and completions) talk to the
//! same Ollama instance; this client owns the base URL and the
//! underlying connection pool. Per-call timeouts are applied by
//! the callers, since embedding and generation have very
//! different latency profiles.

use crate::core::error::{AskdocError, Result};

/// Async client for one Ollama instance
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AskdocError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }
}
