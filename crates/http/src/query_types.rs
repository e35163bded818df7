//! Request/query types (Deserialize)

use serde::Deserialize;

/// Raw `/api/search` parameters. Kept as strings so validation reports
/// a readable message instead of a deserializer rejection.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub limit: Option<String>,
    pub all: Option<String>,
}

impl SearchQuery {
    /// Expanded mode only for the exact value `"true"`.
    pub fn expanded(&self) -> bool {
        self.all.as_deref() == Some("true")
    }
}
