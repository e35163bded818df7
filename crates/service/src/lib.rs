//! Service layer for exam-results
//!
//! Centralizes request validation and business logic between the HTTP/CLI
//! surfaces and storage.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod batch_loader;
mod error;
mod lookup_service;
mod request;
mod user_service;

#[cfg(test)]
mod test_support;

pub use batch_loader::{BatchLoader, ImportReport};
pub use error::ServiceError;
pub use lookup_service::LookupService;
pub use request::SearchRequest;
pub use user_service::UserService;
