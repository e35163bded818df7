//! Validated name-search phrase.

use std::fmt;

use crate::{MAX_PHRASE_CHARS, ValidationError};

/// A trimmed phrase of 1..=[`MAX_PHRASE_CHARS`] characters.
///
/// A name matches when it contains every whitespace-separated token of the
/// phrase as a case-insensitive substring.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchPhrase(String);

impl SearchPhrase {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::TooShort { field: "q", min: 1 });
        }
        if trimmed.chars().count() > MAX_PHRASE_CHARS {
            return Err(ValidationError::TooLong { field: "q", max: MAX_PHRASE_CHARS });
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whitespace-separated tokens; never empty for a parsed phrase.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    /// In-memory equivalent of the store-side match.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.tokens().all(|token| name.contains(&token.to_lowercase()))
    }
}

impl fmt::Display for SearchPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
