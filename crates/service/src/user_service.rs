use std::sync::Arc;

use exam_results_core::{NewUser, User, ValidationError};
use exam_results_storage::UserRepository;

use crate::ServiceError;

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Create an account. Username is trimmed; both fields must be non-empty.
    pub async fn create_user(&self, username: &str, password: &str) -> Result<User, ServiceError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ValidationError::Missing("username").into());
        }
        if password.is_empty() {
            return Err(ValidationError::Missing("password").into());
        }
        let user = self
            .users
            .create_user(&NewUser { username: username.to_owned(), password: password.to_owned() })
            .await?;
        tracing::info!(id = user.id, username = %user.username, "user created");
        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, ServiceError> {
        self.users.get_user(id).await?.ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<User, ServiceError> {
        self.users
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::NotFound(username.to_owned()))
    }
}
