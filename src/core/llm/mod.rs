//! Language-model collaborator.

use async_trait::async_trait;

use crate::core::error::Result;

mod ollama;

pub use ollama::OllamaGenerator;

/// Takes a prompt string and returns a completion string.
///
/// The composer owns all prompt construction and response
/// post-processing; implementations return the model output as-is.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
