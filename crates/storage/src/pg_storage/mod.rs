//! PostgreSQL storage backend using sqlx.

mod students;
mod users;

use std::time::Duration;

use crate::error::StorageError;
use exam_results_core::{
    PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, StudentRecord, Subjects,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use super::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!(max_connections, "PgStorage initialized");
        Ok(Self { pool })
    }
}

pub(crate) const STUDENT_COLUMNS: &str =
    "id, index_number, name, z_score, district_rank, island_rank, nic_number, subjects";

pub(crate) fn row_to_student(row: &sqlx::postgres::PgRow) -> Result<StudentRecord, StorageError> {
    let subjects: Json<Subjects> = row.try_get("subjects")?;
    Ok(StudentRecord {
        id: row.try_get("id")?,
        index_number: row.try_get("index_number")?,
        name: row.try_get("name")?,
        z_score: row.try_get("z_score")?,
        district_rank: row.try_get("district_rank")?,
        island_rank: row.try_get("island_rank")?,
        nic_number: row.try_get("nic_number")?,
        subjects: subjects.0,
    })
}
