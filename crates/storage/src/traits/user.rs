use async_trait::async_trait;
use exam_results_core::{NewUser, User};

use crate::error::StorageError;

/// Auxiliary user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user(&self, id: i64) -> Result<Option<User>, StorageError>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError>;

    /// Fails with [`StorageError::Duplicate`] when the username is taken.
    async fn create_user(&self, user: &NewUser) -> Result<User, StorageError>;
}
