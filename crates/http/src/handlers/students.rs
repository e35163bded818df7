use crate::api_error::{ApiError, FETCH_FAILED};
use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use crate::AppState;
use crate::response_types::StudentResponse;

pub async fn get_student(
    State(state): State<Arc<AppState>>,
    Path(index_number): Path<String>,
) -> Result<Json<StudentResponse>, ApiError> {
    state
        .lookup
        .get_by_index_number(&index_number)
        .await
        .map(|student| Json(StudentResponse { student }))
        .map_err(|e| ApiError::from_service(e, FETCH_FAILED))
}
