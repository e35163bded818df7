//! PostgreSQL schema migrations for exam-results storage.

use sqlx::PgPool;

/// Run all PostgreSQL migrations. Every statement is idempotent.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id BIGSERIAL PRIMARY KEY,
            index_number TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            z_score TEXT NOT NULL,
            district_rank TEXT NOT NULL,
            island_rank TEXT NOT NULL,
            nic_number TEXT NOT NULL,
            subjects JSONB NOT NULL DEFAULT '{}'
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // CREATE EXTENSION needs privileges the app role may lack.
    match sqlx::query("CREATE EXTENSION IF NOT EXISTS pg_trgm").execute(pool).await {
        Ok(_) => {
            sqlx::query(
                "CREATE INDEX IF NOT EXISTS idx_students_name_trgm
                   ON students USING gin (name gin_trgm_ops)",
            )
            .execute(pool)
            .await?;
        },
        Err(e) => {
            tracing::warn!("pg_trgm not available, name search runs without trigram index: {e}");
        },
    }

    Ok(())
}
