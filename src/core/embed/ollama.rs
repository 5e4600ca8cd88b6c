//! Ollama-backed embedder.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::error::{AskdocError, Result};
use crate::core::ollama::OllamaClient;

use super::Embedder;

/// Embedder calling Ollama's `/api/embeddings` endpoint.
///
/// Texts are embedded one request at a time, in input order, so
/// the order-preservation contract holds trivially.
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    client: OllamaClient,
    model: String,
    timeout: Duration,
}

impl OllamaEmbedder {
    pub fn new(client: OllamaClient, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            model: model.into(),
            timeout,
        }
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.client.base_url());
        let req = EmbeddingsRequest {
            model: &self.model,
            prompt: text,
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
                AskdocError::EmbeddingFailed(format!("Failed to call embeddings endpoint: {e}"))
            })?;

        if !resp.status().is_success() {
            return Err(AskdocError::EmbeddingFailed(format!(
                "Embeddings request failed: status={}",
                resp.status()
            )));
        }

        let body: EmbeddingsResponse = resp.json().await.map_err(|e| {
            AskdocError::EmbeddingFailed(format!("Failed to decode embeddings response: {e}"))
        })?;

        if body.embedding.is_empty() {
            return Err(AskdocError::EmbeddingFailed(
                "Embeddings response was empty".to_string(),
            ));
        }

        Ok(body.embedding)
    }
}

#[derive(Debug, Clone, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed_one(text).await?);
        }
        Ok(vectors)
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_one(text).await
    }
}
