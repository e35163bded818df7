//! Storage layer for exam-results
//!
//! SQLite (default) and PostgreSQL backends behind the `StudentRepository`
//! and `UserRepository` traits.

mod backend;
mod error;
#[cfg(feature = "sqlite")]
mod migrations;
#[cfg(feature = "postgres")]
mod pg_migrations;
#[cfg(feature = "postgres")]
mod pg_storage;
#[cfg(feature = "sqlite")]
mod sqlite_async;
#[cfg(feature = "sqlite")]
mod storage;
#[cfg(all(test, feature = "sqlite"))]
mod tests;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
#[cfg(feature = "postgres")]
pub use pg_storage::PgStorage;
#[cfg(feature = "sqlite")]
pub use storage::Storage;
pub use traits::{StudentRepository, UserRepository};

use exam_results_core::SearchPhrase;

pub(crate) fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// One lowercased `%token%` pattern per phrase token, with `LIKE`
/// metacharacters escaped.
pub(crate) fn like_patterns(phrase: &SearchPhrase) -> Vec<String> {
    phrase.tokens().map(|token| format!("%{}%", escape_like(&token.to_lowercase()))).collect()
}

/// Convert `usize` to `i64` for SQL LIMIT binds.
/// Saturates to `i64::MAX` on overflow (only possible on 128-bit targets).
pub(crate) fn usize_to_i64(val: usize) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}
