//! UserRepository implementation for PgStorage.

use async_trait::async_trait;
use exam_results_core::{NewUser, User};
use sqlx::Row;

use super::PgStorage;
use crate::error::StorageError;
use crate::traits::UserRepository;

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, StorageError> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password: row.try_get("password")?,
    })
}

#[async_trait]
impl UserRepository for PgStorage {
    async fn get_user(&self, id: i64) -> Result<Option<User>, StorageError> {
        let row = sqlx::query("SELECT id, username, password FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_user(&r)).transpose()
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        let row = sqlx::query("SELECT id, username, password FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_user(&r)).transpose()
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, StorageError> {
        let row = sqlx::query(
            "INSERT INTO users (username, password) VALUES ($1, $2)
             RETURNING id, username, password",
        )
        .bind(&user.username)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await?;
        row_to_user(&row)
    }
}
