use exam_results_core::{NewStudent, SearchPhrase, SearchSuggestion, StudentRecord};
use rusqlite::{Connection, OptionalExtension as _, params};

use super::{FOLD_FN, STUDENT_COLUMNS, Storage, coerce_to_sql, get_conn, map_student};
use crate::error::StorageError;
use crate::{like_patterns, usize_to_i64};

fn upsert_on(conn: &Connection, student: &NewStudent) -> Result<StudentRecord, StorageError> {
    let subjects = serde_json::to_string(&student.subjects)?;
    let id: i64 = conn.query_row(
        "INSERT INTO students
           (index_number, name, z_score, district_rank, island_rank, nic_number, subjects)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
           ON CONFLICT(index_number) DO UPDATE SET
             name = excluded.name,
             z_score = excluded.z_score,
             district_rank = excluded.district_rank,
             island_rank = excluded.island_rank,
             nic_number = excluded.nic_number,
             subjects = excluded.subjects
           RETURNING id",
        params![
            student.index_number,
            student.name,
            student.z_score,
            student.district_rank,
            student.island_rank,
            student.nic_number,
            subjects,
        ],
        |row| row.get(0),
    )?;
    Ok(student.clone().into_record(id))
}

impl Storage {
    /// Insert a student, or replace all fields of the existing row with the
    /// same index number.
    ///
    /// # Errors
    /// Returns error if the database write fails.
    pub fn upsert_student(&self, student: &NewStudent) -> Result<StudentRecord, StorageError> {
        let conn = get_conn(&self.pool)?;
        upsert_on(&conn, student)
    }

    /// Upsert a batch inside one transaction.
    ///
    /// # Errors
    /// Returns error (and rolls back) if any write fails.
    pub fn upsert_students(&self, students: &[NewStudent]) -> Result<usize, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction()?;
        for student in students {
            upsert_on(&tx, student)?;
        }
        tx.commit()?;
        Ok(students.len())
    }

    /// # Errors
    /// Returns error if the query fails or the stored subjects are corrupt.
    pub fn get_student_by_index(
        &self,
        index_number: &str,
    ) -> Result<Option<StudentRecord>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let student = conn
            .query_row(
                &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE index_number = ?1"),
                params![index_number],
                map_student,
            )
            .optional()?;
        Ok(student)
    }

    /// Multi-token AND match against the Unicode-lowercased name.
    ///
    /// # Errors
    /// Returns error if the query fails.
    pub fn search_students_by_name(
        &self,
        phrase: &SearchPhrase,
        limit: usize,
    ) -> Result<Vec<SearchSuggestion>, StorageError> {
        let patterns = like_patterns(phrase);
        let where_clause = (1..=patterns.len())
            .map(|i| format!("{FOLD_FN}(name) LIKE ?{i} ESCAPE '\\'"))
            .collect::<Vec<_>>()
            .join(" AND ");
        let sql = format!(
            "SELECT index_number, name FROM students WHERE {where_clause} ORDER BY id LIMIT ?{}",
            patterns.len() + 1
        );

        let limit = usize_to_i64(limit);
        let mut bind: Vec<&dyn rusqlite::ToSql> = patterns.iter().map(|p| coerce_to_sql(p)).collect();
        bind.push(&limit);

        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(bind.as_slice(), |row| {
            Ok(SearchSuggestion { index_number: row.get(0)?, name: row.get(1)? })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// # Errors
    /// Returns error if the query fails.
    pub fn count_students(&self) -> Result<u64, StorageError> {
        let conn = get_conn(&self.pool)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
