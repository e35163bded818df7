use async_trait::async_trait;
use exam_results_core::{NewStudent, SearchPhrase, SearchSuggestion, StudentRecord};

use crate::error::StorageError;

/// Student result records keyed by index number.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Insert, or replace every non-key field when the index number exists.
    async fn upsert_student(&self, student: &NewStudent) -> Result<StudentRecord, StorageError>;

    /// Upsert all records in one transaction. Returns the number written.
    async fn upsert_students(&self, students: &[NewStudent]) -> Result<usize, StorageError>;

    /// Exact-match lookup.
    async fn get_student_by_index(
        &self,
        index_number: &str,
    ) -> Result<Option<StudentRecord>, StorageError>;

    /// Names containing every phrase token (case-insensitive), at most `limit`.
    async fn search_students_by_name(
        &self,
        phrase: &SearchPhrase,
        limit: usize,
    ) -> Result<Vec<SearchSuggestion>, StorageError>;

    async fn count_students(&self) -> Result<u64, StorageError>;
}
