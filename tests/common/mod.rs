//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use askdoc::core::config::Config;
use askdoc::core::embed::Embedder;
use askdoc::core::error::{AskdocError, Result};
use askdoc::core::extract::PlainTextExtractor;
use askdoc::core::llm::LanguageModel;
use askdoc::core::services::Services;
use askdoc::core::types::DocumentsResponse;

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use parking_lot::Mutex;
use tower::ServiceExt as TowerServiceExt;

/// Deterministic embedder: each whitespace token hashes into a
/// fixed bucket, so texts sharing words get similar vectors.
pub struct TestEmbedder;

impl TestEmbedder {
    const DIMENSION: usize = 32;

    fn vectorize(text: &str) -> Vec<f32> {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut vector = vec![0.0f32; Self::DIMENSION];
        for token in text.to_lowercase().split_whitespace() {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            let bucket = (hasher.finish() as usize) % Self::DIMENSION;
            vector[bucket] += 1.0;
        }
        vector
    }
}

#[async_trait]
impl Embedder for TestEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::vectorize(t)).collect())
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        Ok(Self::vectorize(text))
    }
}

/// Language-model double with a scripted response that records
/// every prompt it receives.
pub struct RecordingLlm {
    response: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl RecordingLlm {
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::with_response("")
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl LanguageModel for RecordingLlm {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        match &self.response {
            Some(s) => Ok(s.clone()),
            None => Err(AskdocError::CompletionFailed(
                "scripted failure".to_string(),
            )),
        }
    }
}

/// Build a test application around the mock collaborators.
pub fn test_app(llm: Arc<RecordingLlm>) -> (Router, Arc<Services>) {
    let services = Arc::new(
        Services::with_collaborators(
            Config::default(),
            Arc::new(TestEmbedder),
            llm,
            Arc::new(PlainTextExtractor),
        )
        .unwrap(),
    );

    (askdoc::http::router(Arc::clone(&services)), services)
}

pub const BOUNDARY: &str = "askdoc-test-boundary";

/// Assemble a multipart/form-data body with one `file` part per
/// (name, content) pair.
pub fn multipart_body(files: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, content) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// POST a multipart upload to the app.
pub async fn upload(app: &Router, files: &[(&str, &str)]) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/documents")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(multipart_body(files)))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Fetch the current document listing.
pub async fn list_documents(app: &Router) -> DocumentsResponse {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/documents")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = axum::body::to_bytes(response.into_body(), 1_000_000)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Poll the listing until a document becomes searchable.
///
/// Ingestion is acknowledged before indexing completes, so tests
/// observe completion the same way a client does.
pub async fn wait_for_document(app: &Router, name: &str) -> bool {
    for _ in 0..200 {
        let listing = list_documents(app).await;
        if listing.documents.iter().any(|d| d.name == name) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    false
}
