//! In-memory vector index over one document's chunks.
//!
//! A [`DocumentIndex`] pairs each chunk with its embedding and
//! answers top-k cosine-similarity queries with a brute-force
//! scan. At single-document scale (hundreds to low thousands of
//! chunks) the linear scan is the reference algorithm; the
//! insertion order of chunks is significant and serves as the
//! tie-break for equal scores.

use chrono::{DateTime, Utc};

use crate::core::embed::Embedder;
use crate::core::error::{AskdocError, Result};
use crate::core::types::{Chunk, SearchHit};

/// Immutable per-document index of (chunk, vector) pairs.
///
/// Built atomically by [`DocumentIndex::build`]; re-uploading a
/// document replaces the whole index in the registry rather than
/// mutating this one.
pub struct DocumentIndex {
    name: String,
    dimension: usize,
    entries: Vec<IndexEntry>,
    indexed_at: DateTime<Utc>,
}

struct IndexEntry {
    chunk: Chunk,
    vector: Vec<f32>,
    norm: f32,
}

impl DocumentIndex {
    /// Build an index by embedding all chunks in one batched,
    /// order-preserving call.
    ///
    /// # Errors
    ///
    /// `EmbeddingFailed` if the embedder call fails, returns a
    /// mismatched vector count, or returns vectors of differing
    /// dimensions.
    pub async fn build(
        name: impl Into<String>,
        chunks: Vec<Chunk>,
        embedder: &dyn Embedder,
    ) -> Result<Self> {
        let name = name.into();

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = embedder.embed(&texts).await?;

        if vectors.len() != chunks.len() {
            return Err(AskdocError::EmbeddingFailed(format!(
                "embedder returned {} vectors for {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        let dimension = vectors.first().map(Vec::len).unwrap_or(0);

        let mut entries = Vec::with_capacity(chunks.len());
        for (chunk, vector) in chunks.into_iter().zip(vectors) {
            if vector.len() != dimension {
                return Err(AskdocError::EmbeddingFailed(format!(
                    "embedder returned mixed dimensions ({} and {})",
                    dimension,
                    vector.len()
                )));
            }
            let norm = l2_norm(&vector);
            entries.push(IndexEntry {
                chunk,
                vector,
                norm,
            });
        }

        Ok(Self {
            name,
            dimension,
            entries,
            indexed_at: Utc::now(),
        })
    }

    /// Top-k chunks by cosine similarity to the query.
    ///
    /// Embeds the query, scores it against every stored vector,
    /// and returns up to `k` hits in descending score order. Ties
    /// keep the original chunk order (the scan relies on stable
    /// sorting). An empty index yields an empty result.
    pub async fn search(
        &self,
        query: &str,
        k: usize,
        embedder: &dyn Embedder,
    ) -> Result<Vec<SearchHit>> {
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = embedder.embed_query(query).await?;
        if query_vector.len() != self.dimension {
            return Err(AskdocError::EmbeddingFailed(format!(
                "query vector dimension {} does not match index dimension {}",
                query_vector.len(),
                self.dimension
            )));
        }
        let query_norm = l2_norm(&query_vector);

        let mut scored: Vec<(f32, &IndexEntry)> = self
            .entries
            .iter()
            .map(|entry| {
                let score = cosine_similarity(&query_vector, &entry.vector, query_norm, entry.norm);
                (score, entry)
            })
            .collect();

        // Stable sort: equal scores keep insertion order
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(k.max(1))
            .map(|(score, entry)| SearchHit {
                score,
                text: entry.chunk.text.clone(),
                chunk_index: entry.chunk.chunk_index,
            })
            .collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn indexed_at(&self) -> DateTime<Utc> {
        self.indexed_at
    }
}

fn l2_norm(v: &[f32]) -> f32 {
    let mut sum = 0.0f32;
    for x in v {
        sum += x * x;
    }
    sum.sqrt()
}

fn cosine_similarity(a: &[f32], b: &[f32], a_norm: f32, b_norm: f32) -> f32 {
    if a_norm == 0.0 || b_norm == 0.0 {
        return 0.0;
    }
    let mut dot = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
    }
    dot / (a_norm * b_norm)
}
