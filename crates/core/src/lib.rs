//! Core types for exam-results
//!
//! Domain types, the validated search phrase and the batch input line,
//! shared by every other crate in the workspace.

mod constants;
mod env_config;
mod error;
mod import;
mod search;
mod student;
mod user;

pub use constants::*;
pub use env_config::{
    AppConfig, DATABASE_URL_VAR, DB_PATH_VAR, DB_POOL_SIZE_VAR, DatabaseConfig, default_db_path,
    env_parse_with_default,
};
pub use error::*;
pub use import::{ImportLine, sample_students};
pub use search::SearchPhrase;
pub use student::*;
pub use user::{NewUser, User};
