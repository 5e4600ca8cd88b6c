//! Core domain logic (protocol-agnostic)
//!
//! This module contains all business logic that is independent
//! of the HTTP transport.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **chunker**: UTF-8 safe overlapping text chunking
//! - **extract**: Format dispatch and text extraction seam
//! - **ollama**: Shared Ollama HTTP client
//! - **embed**: Embedding collaborator (trait + Ollama impl)
//! - **llm**: Language-model collaborator (trait + Ollama impl)
//! - **index**: Per-document in-memory vector index
//! - **registry**: Process-wide document registry
//! - **ingest**: Background ingestion pipeline
//! - **answer**: Retrieval and answer composition
//! - **services**: Unified service container

pub mod answer;
pub mod chunker;
pub mod config;
pub mod embed;
pub mod error;
pub mod extract;
pub mod index;
pub mod ingest;
pub mod llm;
pub mod ollama;
pub mod registry;
pub mod services;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

// Re-export key types for convenience
pub use config::Config;
pub use error::{AskdocError, Result};
pub use services::Services;
