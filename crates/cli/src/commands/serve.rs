use anyhow::Result;
use exam_results_http::{AppState, create_router};
use exam_results_service::LookupService;
use std::sync::Arc;

use crate::open_storage;

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let storage = open_storage().await?;
    let lookup = Arc::new(LookupService::new(storage.clone()));
    match lookup.count().await {
        Ok(count) => tracing::info!(count, backend = storage.kind(), "student records available"),
        Err(e) => tracing::warn!("Failed to count student records: {}", e),
    }

    let router = create_router(AppState::new(lookup));
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
