//! `SQLite` storage implementation.
//!
//! All methods are synchronous; the async repository traits delegate to
//! them through `spawn_blocking` (see `sqlite_async`).

// SQLite uses i64 for counts/limits, Rust uses usize - safe conversions within DB context
#![allow(
    clippy::as_conversions,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    reason = "SQLite i64 <-> Rust usize conversions are safe within DB row counts"
)]
// Absolute paths in error handling are acceptable
#![allow(clippy::absolute_paths, reason = "std paths in error handling are clear")]

mod students;
mod users;

use exam_results_core::{StudentRecord, Subjects};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;
use std::path::Path;

use crate::error::StorageError;
use crate::migrations;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Main storage struct wrapping `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StorageError> {
    Ok(pool.get()?)
}

/// Coerce a reference to `ToSql` trait object (avoids trivial cast lint)
pub(crate) fn coerce_to_sql<T: rusqlite::ToSql>(val: &T) -> &dyn rusqlite::ToSql {
    val
}

pub(crate) const STUDENT_COLUMNS: &str =
    "id, index_number, name, z_score, district_rank, island_rank, nic_number, subjects";

/// Map a row selected with [`STUDENT_COLUMNS`].
pub(crate) fn map_student(row: &rusqlite::Row<'_>) -> rusqlite::Result<StudentRecord> {
    let subjects: String = row.get(7)?;
    let subjects: Subjects = serde_json::from_str(&subjects).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(StudentRecord {
        id: row.get(0)?,
        index_number: row.get(1)?,
        name: row.get(2)?,
        z_score: row.get(3)?,
        district_rank: row.get(4)?,
        island_rank: row.get(5)?,
        nic_number: row.get(6)?,
        subjects,
    })
}

/// SQL name of the Unicode lowercase function. Built-in `lower()` and `LIKE`
/// only fold ASCII.
pub(crate) const FOLD_FN: &str = "unicode_lower";

/// Per-connection concurrency settings and the [`FOLD_FN`] function
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 30000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;
    conn.create_scalar_function(
        FOLD_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<String>(0)?.to_lowercase()),
    )?;
    Ok(())
}

impl Storage {
    /// Create new storage instance with `SQLite` connection pool
    pub fn new(db_path: &Path, pool_size: u32) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);
        let pool = Pool::builder().max_size(pool_size.max(1)).build(manager)?;

        // Run migrations on first connection
        let conn = pool.get()?;
        migrations::run_migrations(&conn).map_err(|e| StorageError::Migration(e.to_string()))?;
        drop(conn);

        tracing::info!(path = %db_path.display(), pool_size, "SQLite storage initialized");

        Ok(Self { pool })
    }
}
