//! HTTP REST adapter
//!
//! Depends only on core/. Provides the REST endpoints for
//! uploading, listing, and deleting documents and for asking
//! questions, via the Axum web framework.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::core::services::Services;

pub mod error;
pub mod handlers;
pub mod middleware;

pub use handlers::*;

/// Build the API router.
///
/// The body limit covers a full batch of maximum-size files plus
/// multipart framing overhead.
pub fn router(services: Arc<Services>) -> Router {
    let body_limit =
        services.config.limits.max_files * services.config.max_file_bytes() + 1024 * 1024;

    Router::new()
        // Health check endpoint
        .route("/health", get(handlers::health_handler))
        // API v1 endpoints
        .route(
            "/api/v1/documents",
            post(handlers::upload_handler).get(handlers::list_documents_handler),
        )
        .route(
            "/api/v1/documents/:name",
            delete(handlers::delete_document_handler),
        )
        .route("/api/v1/ask", post(handlers::ask_handler))
        // Add middleware
        .layer(axum_middleware::from_fn(middleware::log_request))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        // Add shared state
        .with_state(services)
}
