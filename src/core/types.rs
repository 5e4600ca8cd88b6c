//! Core data types for the askdoc service.
//!
//! This module defines the data structures used throughout the
//! application, including chunks, search hits, uploads, and the
//! request/response payloads of the REST API.

use serde::{Deserialize, Serialize};

/// A single text chunk from a document.
///
/// Chunks are immutable once created and are owned by the
/// document index built from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// The actual text content
    pub text: String,

    /// Byte offset where the chunk starts in the original text
    pub start_offset: usize,

    /// Sequential chunk number within the document
    pub chunk_index: usize,
}

/// A single result from a document index search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Cosine similarity score (higher = more relevant)
    pub score: f32,

    /// Chunk text content
    pub text: String,

    /// Chunk index within the document
    pub chunk_index: usize,
}

/// A file received from the transport layer, prior to ingestion
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original file name (extension determines the format)
    pub name: String,

    /// Raw file bytes
    pub bytes: Vec<u8>,
}

/// Metadata for one indexed document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Document name (registry key)
    pub name: String,

    /// Number of chunks in the index
    pub chunks: usize,

    /// Indexing timestamp (ISO 8601)
    pub indexed_at: String,
}

/// Response from a document upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Human-readable acknowledgment
    pub message: String,

    /// Names accepted for background processing
    pub files: Vec<String>,
}

/// Response listing all searchable documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsResponse {
    pub documents: Vec<DocumentInfo>,
}

/// Response from a document deletion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub status: String,
    pub name: String,
}

/// Request to answer a question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// The natural-language question
    #[serde(default)]
    pub question: String,

    /// Documents to search; empty means answer from general
    /// knowledge
    #[serde(default)]
    pub files: Vec<String>,
}

/// Response carrying the generated answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
