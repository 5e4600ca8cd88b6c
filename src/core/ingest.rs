//! Ingestion pipeline orchestration.
//!
//! Coordinates the per-file workflow: extract text, chunk, embed,
//! build a document index, and publish it to the registry. The
//! caller gets an acknowledgment as soon as the batch validates;
//! the per-file work runs in a detached task set and failures are
//! absorbed at the file boundary, so one bad file never delays or
//! aborts its siblings. Completion is observable only through the
//! document listing.

use std::sync::Arc;

use futures::future::join_all;

use crate::core::chunker::Chunker;
use crate::core::config::Config;
use crate::core::embed::Embedder;
use crate::core::error::{AskdocError, Result};
use crate::core::extract::{DocumentFormat, TextExtractor};
use crate::core::index::DocumentIndex;
use crate::core::registry::DocumentRegistry;
use crate::core::types::{Chunk, UploadedFile};

/// Orchestrates document ingestion
#[derive(Clone)]
pub struct IngestPipeline {
    chunker: Chunker,
    registry: Arc<DocumentRegistry>,
    embedder: Arc<dyn Embedder>,
    extractor: Arc<dyn TextExtractor>,
    max_files: usize,
    max_file_bytes: usize,
}

impl IngestPipeline {
    pub fn new(
        config: &Config,
        registry: Arc<DocumentRegistry>,
        embedder: Arc<dyn Embedder>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self {
            chunker: Chunker::new(config.chunking.chunk_size, config.chunking.overlap),
            registry,
            embedder,
            extractor,
            max_files: config.limits.max_files,
            max_file_bytes: config.max_file_bytes(),
        }
    }

    /// Accept a batch for background processing.
    ///
    /// Validates the batch and returns the accepted file names
    /// immediately; extraction, embedding, and indexing continue
    /// in a detached task. Callers poll the document listing to
    /// learn when a file becomes searchable.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for an empty batch, too many files, or an
    /// oversized file. Per-file processing faults are not errors
    /// here; they are logged and the file never appears in the
    /// registry.
    pub fn ingest(&self, files: Vec<UploadedFile>) -> Result<Vec<String>> {
        self.validate_batch(&files)?;

        let accepted: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
        tracing::info!(files = ?accepted, "Files received, processing in the background");

        let pipeline = self.clone();
        tokio::spawn(async move {
            pipeline.process_batch(files).await;
        });

        Ok(accepted)
    }

    fn validate_batch(&self, files: &[UploadedFile]) -> Result<()> {
        if files.is_empty() {
            return Err(AskdocError::InvalidRequest("No files uploaded".to_string()));
        }
        if files.len() > self.max_files {
            return Err(AskdocError::InvalidRequest(format!(
                "Too many files: {} (limit {})",
                files.len(),
                self.max_files
            )));
        }
        for file in files {
            if file.bytes.len() > self.max_file_bytes {
                return Err(AskdocError::InvalidRequest(format!(
                    "File too large: {} ({} bytes, limit {})",
                    file.name,
                    file.bytes.len(),
                    self.max_file_bytes
                )));
            }
        }
        Ok(())
    }

    /// Process every file of a batch, isolating failures.
    ///
    /// All files are processed concurrently and the call settles
    /// when the last one does; a failing file is logged and
    /// dropped without affecting the others. Exposed so tests can
    /// await completion deterministically.
    pub async fn process_batch(&self, files: Vec<UploadedFile>) {
        let outcomes = join_all(files.into_iter().map(|file| {
            let name = file.name.clone();
            async move {
                match self.process_file(file).await {
                    Ok(chunks) => {
                        tracing::info!(document = %name, chunks, "Document indexed");
                        true
                    }
                    Err(e) => {
                        tracing::warn!(document = %name, error = %e, "Failed to process document");
                        false
                    }
                }
            }
        }))
        .await;

        let indexed = outcomes.iter().filter(|ok| **ok).count();
        let failed = outcomes.len() - indexed;
        tracing::info!(indexed, failed, "Batch processing complete");
    }

    /// Process a single file end to end.
    ///
    /// Returns the number of chunks indexed.
    async fn process_file(&self, file: UploadedFile) -> Result<usize> {
        let format = DocumentFormat::from_name(&file.name)?;
        let text = self.extractor.extract(format, &file.bytes)?;

        if text.trim().is_empty() {
            return Err(AskdocError::EmptyExtraction(file.name));
        }

        let chunks: Vec<Chunk> = self.chunker.split(&text).collect();
        let index = DocumentIndex::build(file.name, chunks, self.embedder.as_ref()).await?;
        let chunk_count = index.len();

        // Atomic swap: readers see the old index or this one,
        // never a partial build
        self.registry.insert(index);

        Ok(chunk_count)
    }
}
