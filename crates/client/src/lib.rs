//! Client side of exam-results.
//!
//! [`SearchBox`] and [`DetailPanel`] model the interactive search flow as
//! plain state machines driven by explicit events and timestamps, so any
//! front end (terminal, web, test) can render them. [`ApiClient`] talks to
//! the HTTP API.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod api;
mod detail_panel;
mod display;
mod error;
mod search_box;

pub use api::ApiClient;
pub use detail_panel::{DetailOutcome, DetailPanel, DetailView};
pub use display::{initials, subject_rows};
pub use error::ClientError;
pub use search_box::{Key, RequestToken, SearchBox, SearchCommand, SearchView};
