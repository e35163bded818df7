use exam_results_core::{NewUser, User};
use rusqlite::{OptionalExtension as _, params};

use super::{Storage, get_conn};
use crate::error::StorageError;

fn map_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User { id: row.get(0)?, username: row.get(1)?, password: row.get(2)? })
}

impl Storage {
    /// # Errors
    /// Returns error if the query fails.
    pub fn get_user(&self, id: i64) -> Result<Option<User>, StorageError> {
        let conn = get_conn(&self.pool)?;
        Ok(conn
            .query_row("SELECT id, username, password FROM users WHERE id = ?1", params![id], map_user)
            .optional()?)
    }

    /// # Errors
    /// Returns error if the query fails.
    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        let conn = get_conn(&self.pool)?;
        Ok(conn
            .query_row(
                "SELECT id, username, password FROM users WHERE username = ?1",
                params![username],
                map_user,
            )
            .optional()?)
    }

    /// # Errors
    /// Returns [`StorageError::Duplicate`] if the username exists.
    pub fn create_user(&self, user: &NewUser) -> Result<User, StorageError> {
        let conn = get_conn(&self.pool)?;
        let id: i64 = conn.query_row(
            "INSERT INTO users (username, password) VALUES (?1, ?2) RETURNING id",
            params![user.username, user.password],
            |row| row.get(0),
        )?;
        Ok(User { id, username: user.username.clone(), password: user.password.clone() })
    }
}
