//! askdoc - Retrieval-Augmented Document Q&A Service
//!
//! An HTTP service for uploading documents, indexing them for
//! semantic retrieval, and answering natural-language questions
//! from retrieved document context (or from general knowledge
//! when no relevant context exists).
//!
//! # Architecture
//!
//! The codebase is organized into two main modules:
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, types
//!   - chunker (UTF-8 safe overlapping chunks)
//!   - extract (format dispatch, extraction seam)
//!   - embed / llm / ollama (injected collaborators)
//!   - index (per-document in-memory vector index)
//!   - registry (process-wide document registry)
//!   - ingest (background ingestion pipeline)
//!   - answer (retrieval + prompt composition)
//!   - services (unified service container)
//!
//! - **http**: REST API adapter (depends on core)
//!   - handlers, error mapping, middleware, router
//!
//! # Key Properties
//!
//! - Uploads are acknowledged immediately; indexing runs in a
//!   detached task set with per-file failure isolation. Clients
//!   poll the document listing for completion.
//! - Each document owns one immutable vector index; re-uploads
//!   replace the index wholesale, never in place.
//! - All state is process memory; a restart starts from an
//!   empty registry.

// Core domain logic (protocol-agnostic)
pub mod core;

// HTTP REST adapter
pub mod http;

// Re-export commonly used types for convenience
pub use crate::core::config::Config;
pub use crate::core::error::{AskdocError, Result};
pub use crate::core::services::Services;
pub use crate::core::types::*;
