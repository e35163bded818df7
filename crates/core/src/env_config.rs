//! Environment-driven configuration with warn-level logging for invalid values.

use std::path::PathBuf;

use crate::{PG_POOL_MAX_CONNECTIONS, SQLITE_POOL_MAX_CONNECTIONS};

/// PostgreSQL connection string. Selects the PostgreSQL backend when set.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// SQLite database file, used when `DATABASE_URL` is not a PostgreSQL URL.
pub const DB_PATH_VAR: &str = "EXAM_RESULTS_DB_PATH";

/// Connection pool size override for either backend.
pub const DB_POOL_SIZE_VAR: &str = "EXAM_RESULTS_DB_POOL_SIZE";

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        Err(_) => default,
    }
}

/// Where student and user records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    Sqlite { path: PathBuf },
    Postgres { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub pool_size: u32,
}

impl AppConfig {
    /// Build configuration from `DATABASE_URL`, `EXAM_RESULTS_DB_PATH`
    /// and `EXAM_RESULTS_DB_POOL_SIZE`.
    #[must_use]
    pub fn from_env() -> Self {
        let database = Self::select_database(
            std::env::var(DATABASE_URL_VAR).ok(),
            std::env::var(DB_PATH_VAR).ok(),
        );
        let default_pool = match database {
            DatabaseConfig::Sqlite { .. } => SQLITE_POOL_MAX_CONNECTIONS,
            DatabaseConfig::Postgres { .. } => PG_POOL_MAX_CONNECTIONS,
        };
        let pool_size = env_parse_with_default(DB_POOL_SIZE_VAR, default_pool).max(1);
        Self { database, pool_size }
    }

    fn select_database(database_url: Option<String>, db_path: Option<String>) -> DatabaseConfig {
        match database_url {
            Some(url) if url.starts_with("postgres://") || url.starts_with("postgresql://") => {
                DatabaseConfig::Postgres { url }
            },
            _ => DatabaseConfig::Sqlite {
                path: db_path
                    .filter(|p| !p.trim().is_empty())
                    .map_or_else(default_db_path, PathBuf::from),
            },
        }
    }
}

/// `<data_local_dir>/exam-results/results.db`, or `./exam-results/results.db`
/// when the platform has no data directory.
#[must_use]
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("exam-results")
        .join("results.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_parse_valid_value() {
        let var_name = "TEST_EXAM_ENV_PARSE_VALID_51831";
        unsafe { std::env::set_var(var_name, "42") };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 42);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_invalid_value() {
        let var_name = "TEST_EXAM_ENV_PARSE_INVALID_51832";
        unsafe { std::env::set_var(var_name, "banana") };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_missing_var() {
        let result: u32 = env_parse_with_default("TEST_EXAM_ENV_PARSE_MISSING_51833", 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_postgres_url_selects_postgres() {
        let db = AppConfig::select_database(
            Some("postgres://u:p@localhost/results".to_owned()),
            Some("/tmp/ignored.db".to_owned()),
        );
        assert_eq!(db, DatabaseConfig::Postgres { url: "postgres://u:p@localhost/results".to_owned() });
    }

    #[test]
    fn test_non_postgres_url_falls_back_to_sqlite_path() {
        let db = AppConfig::select_database(
            Some("mysql://nope".to_owned()),
            Some("/tmp/results.db".to_owned()),
        );
        assert_eq!(db, DatabaseConfig::Sqlite { path: PathBuf::from("/tmp/results.db") });
    }

    #[test]
    fn test_blank_path_uses_default() {
        let db = AppConfig::select_database(None, Some("  ".to_owned()));
        assert_eq!(db, DatabaseConfig::Sqlite { path: default_db_path() });
    }
}
