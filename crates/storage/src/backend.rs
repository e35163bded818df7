//! Unified storage backend with enum dispatch.

#[cfg(feature = "sqlite")]
use std::path::Path;

use async_trait::async_trait;
use exam_results_core::{
    AppConfig, DatabaseConfig, NewStudent, NewUser, SearchPhrase, SearchSuggestion,
    StudentRecord, User,
};

use crate::error::StorageError;
use crate::traits::{StudentRepository, UserRepository};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite(s) => <crate::Storage as $trait>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::pg_storage::PgStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    #[cfg(feature = "sqlite")]
    Sqlite(crate::Storage),
    #[cfg(feature = "postgres")]
    Postgres(crate::pg_storage::PgStorage),
}

impl StorageBackend {
    #[cfg(feature = "sqlite")]
    pub fn new_sqlite(db_path: &Path, pool_size: u32) -> Result<Self, StorageError> {
        Ok(Self::Sqlite(crate::Storage::new(db_path, pool_size)?))
    }

    #[cfg(feature = "postgres")]
    pub async fn new_postgres(database_url: &str, pool_size: u32) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::pg_storage::PgStorage::new(database_url, pool_size).await?))
    }

    /// Open whichever backend the configuration selects.
    pub async fn open(config: &AppConfig) -> Result<Self, StorageError> {
        match &config.database {
            #[cfg(feature = "sqlite")]
            DatabaseConfig::Sqlite { path } => Self::new_sqlite(path, config.pool_size),
            #[cfg(feature = "postgres")]
            DatabaseConfig::Postgres { url } => Self::new_postgres(url, config.pool_size).await,
            #[allow(unreachable_patterns, reason = "reachable when a backend feature is off")]
            _ => Err(StorageError::Migration(
                "configured storage backend is not compiled in".to_owned(),
            )),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }
}

// ── StudentRepository ────────────────────────────────────────────

#[async_trait]
impl StudentRepository for StorageBackend {
    async fn upsert_student(&self, student: &NewStudent) -> Result<StudentRecord, StorageError> {
        dispatch!(self, StudentRepository, upsert_student(student))
    }

    async fn upsert_students(&self, students: &[NewStudent]) -> Result<usize, StorageError> {
        dispatch!(self, StudentRepository, upsert_students(students))
    }

    async fn get_student_by_index(
        &self,
        index_number: &str,
    ) -> Result<Option<StudentRecord>, StorageError> {
        dispatch!(self, StudentRepository, get_student_by_index(index_number))
    }

    async fn search_students_by_name(
        &self,
        phrase: &SearchPhrase,
        limit: usize,
    ) -> Result<Vec<SearchSuggestion>, StorageError> {
        dispatch!(self, StudentRepository, search_students_by_name(phrase, limit))
    }

    async fn count_students(&self) -> Result<u64, StorageError> {
        dispatch!(self, StudentRepository, count_students())
    }
}

// ── UserRepository ───────────────────────────────────────────────

#[async_trait]
impl UserRepository for StorageBackend {
    async fn get_user(&self, id: i64) -> Result<Option<User>, StorageError> {
        dispatch!(self, UserRepository, get_user(id))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        dispatch!(self, UserRepository, get_user_by_username(username))
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, StorageError> {
        dispatch!(self, UserRepository, create_user(user))
    }
}
