use thiserror::Error;

/// Rejected request input. The message is safe to show to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Validation error: \"{0}\" is required")]
    Missing(&'static str),

    #[error("Validation error: \"{field}\" must contain at least {min} character(s)")]
    TooShort { field: &'static str, min: usize },

    #[error("Validation error: \"{field}\" must contain at most {max} character(s)")]
    TooLong { field: &'static str, max: usize },

    #[error("Validation error: \"{field}\" must be a positive integer, got \"{value}\"")]
    NotPositiveInteger { field: &'static str, value: String },
}

/// A single batch input line that could not be turned into a student record.
#[derive(Error, Debug)]
pub enum RowImportError {
    #[error("line is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required field \"{0}\"")]
    MissingField(&'static str),

    #[error("field \"{field}\" has unsupported type {kind}")]
    UnsupportedValue { field: &'static str, kind: &'static str },
}
