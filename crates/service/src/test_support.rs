//! In-memory and failing repositories for service tests.

#![allow(clippy::unwrap_used, reason = "test code")]

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use exam_results_core::{NewStudent, SearchPhrase, SearchSuggestion, StudentRecord, Subjects};
use exam_results_storage::{Storage, StorageError, StudentRepository};
use tempfile::TempDir;

pub fn student(index_number: &str, name: &str) -> NewStudent {
    NewStudent {
        index_number: index_number.to_owned(),
        name: name.to_owned(),
        z_score: "1.0128".to_owned(),
        district_rank: "1968".to_owned(),
        island_rank: "10177".to_owned(),
        nic_number: "200564002042".to_owned(),
        subjects: Subjects::from([("ECONOMICS".to_owned(), "B".to_owned())]),
    }
}

pub fn sqlite_storage() -> (Storage, TempDir) {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(&dir.path().join("service.db"), 2).unwrap();
    (storage, dir)
}

/// Keyed by index number; ids assigned in insertion order.
#[derive(Default)]
pub struct MemoryRepository {
    rows: Mutex<BTreeMap<String, StudentRecord>>,
}

impl MemoryRepository {
    pub fn insert(&self, student: NewStudent) -> StudentRecord {
        let mut rows = self.rows.lock().unwrap();
        let id = rows
            .get(&student.index_number)
            .map_or_else(|| i64::try_from(rows.len()).unwrap() + 1, |r| r.id);
        let record = student.into_record(id);
        rows.insert(record.index_number.clone(), record.clone());
        record
    }

    pub fn get(&self, index_number: &str) -> Option<StudentRecord> {
        self.rows.lock().unwrap().get(index_number).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl StudentRepository for MemoryRepository {
    async fn upsert_student(&self, student: &NewStudent) -> Result<StudentRecord, StorageError> {
        Ok(self.insert(student.clone()))
    }

    async fn upsert_students(&self, students: &[NewStudent]) -> Result<usize, StorageError> {
        for student in students {
            self.insert(student.clone());
        }
        Ok(students.len())
    }

    async fn get_student_by_index(
        &self,
        index_number: &str,
    ) -> Result<Option<StudentRecord>, StorageError> {
        Ok(self.get(index_number))
    }

    async fn search_students_by_name(
        &self,
        phrase: &SearchPhrase,
        limit: usize,
    ) -> Result<Vec<SearchSuggestion>, StorageError> {
        let rows = self.rows.lock().unwrap();
        let mut hits: Vec<&StudentRecord> = rows.values().filter(|r| phrase.matches(&r.name)).collect();
        hits.sort_by_key(|r| r.id);
        Ok(hits.into_iter().take(limit).map(SearchSuggestion::from).collect())
    }

    async fn count_students(&self) -> Result<u64, StorageError> {
        Ok(self.len() as u64)
    }
}

/// Every call fails like a dropped database connection.
pub struct FailingRepository;

fn unavailable() -> StorageError {
    StorageError::Pool("database unavailable".to_owned())
}

#[async_trait]
impl StudentRepository for FailingRepository {
    async fn upsert_student(&self, _: &NewStudent) -> Result<StudentRecord, StorageError> {
        Err(unavailable())
    }

    async fn upsert_students(&self, _: &[NewStudent]) -> Result<usize, StorageError> {
        Err(unavailable())
    }

    async fn get_student_by_index(&self, _: &str) -> Result<Option<StudentRecord>, StorageError> {
        Err(unavailable())
    }

    async fn search_students_by_name(
        &self,
        _: &SearchPhrase,
        _: usize,
    ) -> Result<Vec<SearchSuggestion>, StorageError> {
        Err(unavailable())
    }

    async fn count_students(&self) -> Result<u64, StorageError> {
        Err(unavailable())
    }
}
