//! Typed search request boundary.

use exam_results_core::{
    DEFAULT_SEARCH_LIMIT, EXPANDED_SEARCH_LIMIT, SearchPhrase, ValidationError,
};

/// A validated search: phrase plus the effective result cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub phrase: SearchPhrase,
    pub limit: usize,
}

impl SearchRequest {
    /// Validate raw query parameters.
    ///
    /// `limit` defaults to [`DEFAULT_SEARCH_LIMIT`] and is capped at
    /// [`EXPANDED_SEARCH_LIMIT`]. `expanded` overrides it with the cap.
    pub fn parse(
        q: Option<&str>,
        limit: Option<&str>,
        expanded: bool,
    ) -> Result<Self, ValidationError> {
        let phrase = SearchPhrase::parse(q.ok_or(ValidationError::Missing("q"))?)?;
        let limit = match limit {
            None => DEFAULT_SEARCH_LIMIT,
            Some(raw) => parse_limit(raw)?,
        };
        let limit = if expanded { EXPANDED_SEARCH_LIMIT } else { limit.min(EXPANDED_SEARCH_LIMIT) };
        Ok(Self { phrase, limit })
    }
}

fn parse_limit(raw: &str) -> Result<usize, ValidationError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        Ok(_) | Err(_) => Err(ValidationError::NotPositiveInteger {
            field: "limit",
            value: raw.to_owned(),
        }),
    }
}
