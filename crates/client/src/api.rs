use exam_results_core::{SearchSuggestion, StudentRecord};
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::error::ClientError;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Deserialize)]
struct SearchResponse {
    results: Vec<SearchSuggestion>,
}

#[derive(Deserialize)]
struct StudentResponse {
    student: StudentRecord,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the exam results HTTP API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// # Errors
    /// Returns an error if `base_url` is not an absolute http(s) URL or the
    /// HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|_| ClientError::InvalidBaseUrl(base_url.to_owned()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ClientError::ClientInit(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// `GET /api/search`. `expanded` sends `all=true`.
    pub async fn search(
        &self,
        phrase: &str,
        expanded: bool,
    ) -> Result<Vec<SearchSuggestion>, ClientError> {
        self.search_with_limit(phrase, None, expanded).await
    }

    pub async fn search_with_limit(
        &self,
        phrase: &str,
        limit: Option<usize>,
        expanded: bool,
    ) -> Result<Vec<SearchSuggestion>, ClientError> {
        let mut url = self.endpoint(&["api", "search"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("q", phrase);
            if let Some(limit) = limit {
                query.append_pair("limit", &limit.to_string());
            }
            if expanded {
                query.append_pair("all", "true");
            }
        }
        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<SearchResponse>().await?.results)
    }

    /// `GET /api/students/{index_number}`. 404 becomes [`ClientError::NotFound`].
    pub async fn get_student(&self, index_number: &str) -> Result<StudentRecord, ClientError> {
        let url = self.endpoint(&["api", "students", index_number])?;
        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(index_number.to_owned()));
        }
        let response = check_status(response).await?;
        Ok(response.json::<StudentResponse>().await?.student)
    }

    /// Base URL plus percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body).map_or(body, |b| b.error);
    tracing::debug!(status = status.as_u16(), %message, "API request failed");
    Err(ClientError::HttpStatus { code: status.as_u16(), message })
}
