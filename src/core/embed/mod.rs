//! Text embedding collaborator.
//!
//! The core never inspects vectors beyond their dimension and
//! distance computation, so the embedder is a trait: production
//! wires the Ollama implementation, tests wire a deterministic
//! double.

use async_trait::async_trait;

use crate::core::error::Result;

mod ollama;

pub use ollama::OllamaEmbedder;

/// Converts passages and queries into fixed-dimension vectors.
///
/// `embed` returns one vector per input text, preserving order.
/// Implementations must be deterministic for identical input
/// under a fixed model configuration.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;
}
