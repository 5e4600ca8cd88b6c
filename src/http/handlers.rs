//! HTTP request handlers for the askdoc API
//!
//! Implements handlers for all 5 REST endpoints: health, upload,
//! list documents, delete document, and ask.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::core::error::AskdocError;
use crate::core::services::Services;
use crate::core::types::*;
use crate::http::error::ApiError;

/// Health check handler
///
/// Returns server status and version information.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Upload handler
///
/// Accepts a multipart batch of files (repeatable `file` parts)
/// and acknowledges with 202 once the batch validates. Extraction
/// and indexing continue in the background; clients poll the
/// document listing to learn when a file becomes searchable.
///
/// # Errors
///
/// - `InvalidRequest`: empty batch, too many files, oversized
///   file, or a malformed multipart body
pub async fn upload_handler(
    State(services): State<Arc<Services>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AskdocError::InvalidRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let name = field.file_name().map(ToString::to_string).ok_or_else(|| {
            AskdocError::InvalidRequest("File part is missing a file name".to_string())
        })?;

        let bytes = field.bytes().await.map_err(|e| {
            AskdocError::InvalidRequest(format!("Failed to read file {name}: {e}"))
        })?;

        files.push(UploadedFile {
            name,
            bytes: bytes.to_vec(),
        });
    }

    let accepted = services.pipeline.ingest(files)?;

    Ok((
        StatusCode::ACCEPTED,
        Json(UploadResponse {
            message: "Files received. Processing in the background.".to_string(),
            files: accepted,
        }),
    ))
}

/// List documents handler
///
/// Returns metadata for all currently searchable documents. Used
/// for polling after an upload.
pub async fn list_documents_handler(
    State(services): State<Arc<Services>>,
) -> Result<Json<DocumentsResponse>, ApiError> {
    Ok(Json(DocumentsResponse {
        documents: services.registry.list(),
    }))
}

/// Delete document handler
///
/// Removes a document and its index from the registry.
///
/// # Errors
///
/// - `DocumentNotFound`: no document under that name
pub async fn delete_document_handler(
    State(services): State<Arc<Services>>,
    Path(name): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    services.registry.remove(&name)?;

    tracing::info!(document = %name, "Deleted document");

    Ok(Json(DeleteResponse {
        status: "deleted".to_string(),
        name,
    }))
}

/// Ask handler
///
/// Answers a question from the selected documents' context, or
/// from general knowledge when no selection produces context.
///
/// # Errors
///
/// - `InvalidRequest`: missing or empty question
/// - `CompletionFailed`: the language-model call itself errored
pub async fn ask_handler(
    State(services): State<Arc<Services>>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let answer = services.composer.answer(&req.question, &req.files).await?;

    Ok(Json(AskResponse { answer }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::core::extract::PlainTextExtractor;
    use crate::core::mock::{MockEmbedder, MockLlm};

    fn test_services(llm: MockLlm) -> Arc<Services> {
        Arc::new(
            Services::with_collaborators(
                Config::default(),
                Arc::new(MockEmbedder::new()),
                Arc::new(llm),
                Arc::new(PlainTextExtractor),
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await.into_response();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_ask_empty_question() {
        let services = test_services(MockLlm::with_response("ok"));

        let req = AskRequest {
            question: "   ".to_string(),
            files: vec![],
        };

        let result = ask_handler(State(services), Json(req)).await;

        let err = result.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ask_general_knowledge() {
        let services = test_services(MockLlm::with_response("- 4"));

        let req = AskRequest {
            question: "What is 2+2?".to_string(),
            files: vec![],
        };

        let response = ask_handler(State(services), Json(req)).await.unwrap();
        assert_eq!(response.0.answer, "- 4");
    }

    #[tokio::test]
    async fn test_ask_llm_failure_is_internal() {
        let services = test_services(MockLlm::failing());

        let req = AskRequest {
            question: "What is 2+2?".to_string(),
            files: vec![],
        };

        let err = ask_handler(State(services), Json(req)).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_delete_nonexistent_document() {
        let services = test_services(MockLlm::with_response("ok"));

        let result =
            delete_document_handler(State(services), Path("nonexistent.txt".to_string())).await;

        let err = result.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_documents_empty() {
        let services = test_services(MockLlm::with_response("ok"));

        let response = list_documents_handler(State(services)).await.unwrap();
        assert!(response.0.documents.is_empty());
    }
}
