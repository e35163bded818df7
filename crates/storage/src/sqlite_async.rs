//! Async repository implementations for SQLite `Storage` via `spawn_blocking`.

use async_trait::async_trait;
use exam_results_core::{NewStudent, NewUser, SearchPhrase, SearchSuggestion, StudentRecord, User};

use crate::Storage;
use crate::error::StorageError;
use crate::traits::{StudentRepository, UserRepository};

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Task(format!("spawn_blocking join error: {e}")))?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg`     : `.clone()` a `&T`, pass as `&arg`
/// - `@str arg`     : `.to_owned()` a `&str`, pass as `&arg`
/// - `@slice arg`   : `.to_vec()` a `&[T]`, pass as `&arg`
/// - `@val arg`     : move directly (Copy/owned types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture slice $arg:ident) => { let $arg = $arg.to_vec(); };
    (@capture val $arg:ident) => { };
    (@pass ref $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
    (@pass slice $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

// ── StudentRepository ────────────────────────────────────────────

#[async_trait]
impl StudentRepository for Storage {
    async fn upsert_student(&self, student: &NewStudent) -> Result<StudentRecord, StorageError> {
        delegate!(self, upsert_student, @ref student)
    }
    async fn upsert_students(&self, students: &[NewStudent]) -> Result<usize, StorageError> {
        delegate!(self, upsert_students, @slice students)
    }
    async fn get_student_by_index(
        &self,
        index_number: &str,
    ) -> Result<Option<StudentRecord>, StorageError> {
        delegate!(self, get_student_by_index, @str index_number)
    }
    async fn search_students_by_name(
        &self,
        phrase: &SearchPhrase,
        limit: usize,
    ) -> Result<Vec<SearchSuggestion>, StorageError> {
        delegate!(self, search_students_by_name, @ref phrase, @val limit)
    }
    async fn count_students(&self) -> Result<u64, StorageError> {
        delegate!(self, count_students)
    }
}

// ── UserRepository ───────────────────────────────────────────────

#[async_trait]
impl UserRepository for Storage {
    async fn get_user(&self, id: i64) -> Result<Option<User>, StorageError> {
        delegate!(self, get_user, @val id)
    }
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        delegate!(self, get_user_by_username, @str username)
    }
    async fn create_user(&self, user: &NewUser) -> Result<User, StorageError> {
        delegate!(self, create_user, @ref user)
    }
}
