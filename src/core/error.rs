//! Error types and error handling for the askdoc service.
//!
//! This module defines the error types used throughout the
//! application. Protocol-specific error handling (HTTP status
//! codes) is handled in the adapter modules.

use thiserror::Error;

/// Result type alias for askdoc operations
pub type Result<T> = std::result::Result<T, AskdocError>;

/// Main error type for the askdoc service
#[derive(Error, Debug)]
pub enum AskdocError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("No text extracted from {0}")]
    EmptyExtraction(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("Completion failed: {0}")]
    CompletionFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl AskdocError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AskdocError::DocumentNotFound(_))
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            AskdocError::InvalidRequest(_)
                | AskdocError::UnsupportedFormat(_)
                | AskdocError::ConfigError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_not_found_is_not_found() {
        let err = AskdocError::DocumentNotFound("report.pdf".to_string());
        assert!(err.is_not_found());
        assert!(!err.is_bad_request());
    }

    #[test]
    fn test_invalid_request_is_bad_request() {
        let err = AskdocError::InvalidRequest("empty question".to_string());
        assert!(err.is_bad_request());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_unsupported_format_is_bad_request() {
        let err = AskdocError::UnsupportedFormat("exe".to_string());
        assert!(err.is_bad_request());
    }

    #[test]
    fn test_completion_failed_is_internal() {
        let err = AskdocError::CompletionFailed("connection refused".to_string());
        assert!(!err.is_not_found());
        assert!(!err.is_bad_request());
    }

    #[test]
    fn test_embedding_failed_is_internal() {
        let err = AskdocError::EmbeddingFailed("model not loaded".to_string());
        assert!(!err.is_not_found());
        assert!(!err.is_bad_request());
    }

    #[test]
    fn test_error_message() {
        let err = AskdocError::DocumentNotFound("notes.txt".to_string());
        assert!(err.message().contains("notes.txt"));
        assert!(err.message().contains("not found"));
    }
}
