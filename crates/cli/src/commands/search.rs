use anyhow::Result;
use exam_results_client::ApiClient;
use exam_results_service::LookupService;

use crate::open_storage;

pub(crate) async fn run_search(
    phrase: &str,
    limit: Option<usize>,
    all: bool,
    server: Option<&str>,
) -> Result<()> {
    let results = if let Some(server) = server {
        ApiClient::new(server)?.search_with_limit(phrase, limit, all).await?
    } else {
        let lookup = LookupService::new(open_storage().await?);
        let limit = limit.map(|n| n.to_string());
        lookup.search(Some(phrase), limit.as_deref(), all).await?
    };
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

pub(crate) async fn run_get(index_number: &str, server: Option<&str>) -> Result<()> {
    let student = if let Some(server) = server {
        match ApiClient::new(server)?.get_student(index_number).await {
            Ok(student) => Some(student),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e.into()),
        }
    } else {
        let lookup = LookupService::new(open_storage().await?);
        match lookup.get_by_index_number(index_number).await {
            Ok(student) => Some(student),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e.into()),
        }
    };
    match student {
        Some(student) => println!("{}", serde_json::to_string_pretty(&student)?),
        None => println!("Student not found: {index_number}"),
    }
    Ok(())
}
