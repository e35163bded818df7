use anyhow::Result;
use exam_results_service::UserService;

use crate::open_storage;

pub(crate) async fn run_add_user(username: &str, password: &str) -> Result<()> {
    let users = UserService::new(open_storage().await?);
    let user = users.create_user(username, password).await?;
    println!("Created user {} (id {})", user.username, user.id);
    Ok(())
}
