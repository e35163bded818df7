//! Test utilities and module declarations for storage tests.

use crate::Storage;
use exam_results_core::{NewStudent, Subjects};
use tempfile::TempDir;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path, 2).unwrap();
    (storage, temp_dir)
}

pub fn create_test_student(index_number: &str, name: &str) -> NewStudent {
    NewStudent {
        index_number: index_number.to_owned(),
        name: name.to_owned(),
        z_score: "1.0128".to_owned(),
        district_rank: "1968".to_owned(),
        island_rank: "10177".to_owned(),
        nic_number: "200564002042".to_owned(),
        subjects: Subjects::from([
            ("ECONOMICS".to_owned(), "B".to_owned()),
            ("BUSINESS STUDIES".to_owned(), "C".to_owned()),
            ("ACCOUNTING".to_owned(), "S".to_owned()),
        ]),
    }
}


#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn reopening_existing_database_keeps_rows() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("reopen.db");
    {
        let storage = Storage::new(&db_path, 1).unwrap();
        storage.upsert_student(&create_test_student("1000012", "MOHOMED RISHVAN")).unwrap();
    }
    let storage = Storage::new(&db_path, 1).unwrap();
    assert_eq!(storage.count_students().unwrap(), 1);
}
