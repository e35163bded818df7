//! Shared constants for exam-results.

/// Number of suggestions returned when the caller does not pass a limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Result cap used in expanded mode, also the hard ceiling for any limit.
pub const EXPANDED_SEARCH_LIMIT: usize = 1000;

/// Maximum length of a search phrase, counted in characters after trimming.
pub const MAX_PHRASE_CHARS: usize = 100;

/// Minimum trimmed phrase length before the search box issues a request.
pub const MIN_SUGGEST_CHARS: usize = 2;

/// Debounce delay between the last keystroke and the search request.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Sentinel stored for "not applicable" result fields.
pub const NOT_APPLICABLE: &str = "-";

/// Import progress is logged every this many processed lines.
pub const DEFAULT_IMPORT_PROGRESS_EVERY: u64 = 10_000;

/// SQLite connection pool: default size.
pub const SQLITE_POOL_MAX_CONNECTIONS: u32 = 8;

/// PostgreSQL connection pool: default maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;
