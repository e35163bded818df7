//! StudentRepository implementation for PgStorage.

use async_trait::async_trait;
use exam_results_core::{NewStudent, SearchPhrase, SearchSuggestion, StudentRecord};
use sqlx::Row;
use sqlx::types::Json;

use super::{PgStorage, STUDENT_COLUMNS, row_to_student};
use crate::error::StorageError;
use crate::traits::StudentRepository;
use crate::{like_patterns, usize_to_i64};

async fn upsert_on<'e, E>(executor: E, student: &NewStudent) -> Result<StudentRecord, StorageError>
where
    E: sqlx::PgExecutor<'e>,
{
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO students
           (index_number, name, z_score, district_rank, island_rank, nic_number, subjects)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         ON CONFLICT (index_number) DO UPDATE SET
           name = EXCLUDED.name,
           z_score = EXCLUDED.z_score,
           district_rank = EXCLUDED.district_rank,
           island_rank = EXCLUDED.island_rank,
           nic_number = EXCLUDED.nic_number,
           subjects = EXCLUDED.subjects
         RETURNING id",
    )
    .bind(&student.index_number)
    .bind(&student.name)
    .bind(&student.z_score)
    .bind(&student.district_rank)
    .bind(&student.island_rank)
    .bind(&student.nic_number)
    .bind(Json(&student.subjects))
    .fetch_one(executor)
    .await?;
    Ok(student.clone().into_record(id))
}

fn row_to_suggestion(row: &sqlx::postgres::PgRow) -> Result<SearchSuggestion, StorageError> {
    Ok(SearchSuggestion { index_number: row.try_get("index_number")?, name: row.try_get("name")? })
}

#[async_trait]
impl StudentRepository for PgStorage {
    async fn upsert_student(&self, student: &NewStudent) -> Result<StudentRecord, StorageError> {
        upsert_on(&self.pool, student).await
    }

    async fn upsert_students(&self, students: &[NewStudent]) -> Result<usize, StorageError> {
        let mut tx = self.pool.begin().await?;
        for student in students {
            upsert_on(&mut *tx, student).await?;
        }
        tx.commit().await?;
        Ok(students.len())
    }

    async fn get_student_by_index(
        &self,
        index_number: &str,
    ) -> Result<Option<StudentRecord>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE index_number = $1"
        ))
        .bind(index_number)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_student(&r)).transpose()
    }

    async fn search_students_by_name(
        &self,
        phrase: &SearchPhrase,
        limit: usize,
    ) -> Result<Vec<SearchSuggestion>, StorageError> {
        let patterns = like_patterns(phrase);
        let where_clause = (1..=patterns.len())
            .map(|i| format!("name ILIKE ${i} ESCAPE '\\'"))
            .collect::<Vec<_>>()
            .join(" AND ");
        let sql = format!(
            "SELECT index_number, name FROM students WHERE {where_clause} ORDER BY id LIMIT ${}",
            patterns.len() + 1
        );

        let mut q = sqlx::query(&sql);
        for pattern in &patterns {
            q = q.bind(pattern);
        }
        q = q.bind(usize_to_i64(limit));
        let rows = q.fetch_all(&self.pool).await?;
        rows.iter().map(row_to_suggestion).collect::<Result<_, StorageError>>()
    }

    async fn count_students(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
