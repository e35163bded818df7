//! Response types (Serialize)

use exam_results_core::{SearchSuggestion, StudentRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchSuggestion>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudentResponse {
    pub student: StudentRecord,
}
