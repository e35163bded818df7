use crate::api_error::{ApiError, SEARCH_FAILED};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

use crate::AppState;
use crate::query_types::SearchQuery;
use crate::response_types::SearchResponse;

pub async fn search(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(query) = query
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e.body_text())))?;
    state
        .lookup
        .search(query.q.as_deref(), query.limit.as_deref(), query.expanded())
        .await
        .map(|results| Json(SearchResponse { results }))
        .map_err(|e| ApiError::from_service(e, SEARCH_FAILED))
}
