//! Typed API error for HTTP handlers.
//!
//! Converts service errors into HTTP responses with a JSON body:
//! `{"error": "message"}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use exam_results_service::ServiceError;

pub const STUDENT_NOT_FOUND: &str = "Student not found";
pub const SEARCH_FAILED: &str = "An error occurred while searching students";
pub const FETCH_FAILED: &str = "An error occurred while fetching student details";

/// `Internal` logs the real error server-side and returns the static
/// message to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: invalid query parameters.
    BadRequest(String),
    /// 404 Not Found: no record for the requested key.
    NotFound(String),
    /// 500 Internal Server Error: backend failure. Details logged, not exposed.
    Internal { message: &'static str, source: anyhow::Error },
}

impl ApiError {
    /// Map a service error, using `internal_message` for backend failures.
    pub fn from_service(err: ServiceError, internal_message: &'static str) -> Self {
        match err {
            ServiceError::Validation(e) => Self::BadRequest(e.to_string()),
            ServiceError::NotFound(_) => Self::NotFound(STUDENT_NOT_FOUND.to_owned()),
            other => Self::Internal { message: internal_message, source: other.into() },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Internal { message, source } => {
                tracing::error!(error = ?source, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_owned())
            },
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}
