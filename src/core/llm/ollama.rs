//! Ollama-backed completion model.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::error::{AskdocError, Result};
use crate::core::ollama::OllamaClient;

use super::LanguageModel;

/// Completion model calling Ollama's `/api/generate` endpoint.
#[derive(Debug, Clone)]
pub struct OllamaGenerator {
    client: OllamaClient,
    model: String,
    timeout: Duration,
}

impl OllamaGenerator {
    pub fn new(client: OllamaClient, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            model: model.into(),
            timeout,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[async_trait]
impl LanguageModel for OllamaGenerator {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.client.base_url());
        let req = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let resp = self
            .client
            .http()
            .post(&url)
            .timeout(self.timeout)
            .json(&req)
            .send()
            .await
            .map_err(|e| {
                AskdocError::CompletionFailed(format!("Failed to call generate endpoint: {e}"))
            })?;

        if !resp.status().is_success() {
            return Err(AskdocError::CompletionFailed(format!(
                "Generate request failed: status={}",
                resp.status()
            )));
        }

        let body: GenerateResponse = resp.json().await.map_err(|e| {
            AskdocError::CompletionFailed(format!("Failed to decode generate response: {e}"))
        })?;

        Ok(body.response)
    }
}
