//! Typed error enum for the client crate.

use thiserror::Error;

/// Errors from API calls.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    /// Non-success status; `message` is the server's `error` field when present.
    #[error("HTTP status {code}: {message}")]
    HttpStatus { code: u16, message: String },
    #[error("student {0} not found")]
    NotFound(String),
    #[error("invalid base URL {0}")]
    InvalidBaseUrl(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl ClientError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
