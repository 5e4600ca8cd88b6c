//! Deterministic collaborator doubles for unit tests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::core::embed::Embedder;
use crate::core::error::{AskdocError, Result};
use crate::core::llm::LanguageModel;

/// Embedder double producing token-bucket vectors.
///
/// Each whitespace token hashes into one of a fixed number of
/// buckets, so texts sharing words get similar vectors. Fully
/// deterministic, which the embedder contract requires anyway.
pub(crate) struct MockEmbedder {
    fail: bool,
}

impl MockEmbedder {
    pub(crate) const DIMENSION: usize = 32;

    pub(crate) fn new() -> Self {
        Self { fail: false }
    }

    pub(crate) fn failing() -> Self {
        Self { fail: true }
    }

    fn vectorize(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; Self::DIMENSION];
        for token in text.to_lowercase().split_whitespace() {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            let bucket = (hasher.finish() as usize) % Self::DIMENSION;
            vector[bucket] += 1.0;
        }
        vector
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if self.fail {
            return Err(AskdocError::EmbeddingFailed("mock failure".to_string()));
        }
        Ok(texts.iter().map(|t| Self::vectorize(t)).collect())
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        if self.fail {
            return Err(AskdocError::EmbeddingFailed("mock failure".to_string()));
        }
        Ok(Self::vectorize(text))
    }
}

/// Language-model double with a scripted response.
///
/// Records every prompt it receives so tests can assert on the
/// constructed prompt text.
pub(crate) struct MockLlm {
    response: Result<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    pub(crate) fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: Ok(response.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn empty() -> Self {
        Self::with_response("")
    }

    pub(crate) fn failing() -> Self {
        Self {
            response: Err(AskdocError::CompletionFailed("mock failure".to_string())),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl LanguageModel for MockLlm {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        match &self.response {
            Ok(s) => Ok(s.clone()),
            Err(e) => Err(AskdocError::CompletionFailed(e.to_string())),
        }
    }
}
