//! HTTP API server for exam-results.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;

use axum::{Router, http::Method, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use exam_results_service::LookupService;

pub use response_types::{SearchResponse, StudentResponse};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Search and lookup over student records
    pub lookup: Arc<LookupService>,
}

impl AppState {
    #[must_use]
    pub fn new(lookup: Arc<LookupService>) -> Arc<Self> {
        Arc::new(Self { lookup })
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/search", get(handlers::search::search))
        .route("/api/students/{index_number}", get(handlers::students::get_student))
        .layer(cors_layer())
        .with_state(state)
}

/// Read-only API: any origin may call it.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any)
}

async fn health() -> &'static str {
    "ok"
}
