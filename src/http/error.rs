//! HTTP mapping for service errors.
//!
//! Keeps the core error type transport-free: the adapter wraps it
//! here and converts it to a status code plus a JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::core::error::AskdocError;

/// Wrapper implementing Axum's response conversion
#[derive(Debug)]
pub struct ApiError(pub AskdocError);

impl From<AskdocError> for ApiError {
    fn from(err: AskdocError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Convert the wrapped error to the appropriate HTTP status
    pub fn status_code(&self) -> StatusCode {
        if self.0.is_bad_request() {
            StatusCode::BAD_REQUEST
        } else if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.0.message();

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_status() {
        let err = ApiError(AskdocError::InvalidRequest("empty question".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_document_not_found_status() {
        let err = ApiError(AskdocError::DocumentNotFound("report.pdf".to_string()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unsupported_format_status() {
        let err = ApiError(AskdocError::UnsupportedFormat("exe".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_completion_failed_status() {
        let err = ApiError(AskdocError::CompletionFailed("timeout".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_embedding_failed_status() {
        let err = ApiError(AskdocError::EmbeddingFailed("model missing".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
