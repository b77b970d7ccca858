//! Query layer for the portfolio API.
//!
//! Caches project requests per key with single-flight de-duplication, keeps
//! the filter state in the navigation location, and drives the contact form.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod cache;
mod config;
mod contact_form;
mod error;
mod filter_state;
mod infinite;
mod location;
mod observer;
mod projects;

#[cfg(test)]
mod cache_tests;
#[cfg(test)]
mod observer_tests;

pub use cache::{CacheSnapshot, QueryCache, QueryStatus};
pub use config::{QUERY_GC_ENV, QUERY_STALE_ENV, QueryConfig};
pub use contact_form::{ContactForm, FAILED_MESSAGE, OFFLINE_MESSAGE, SENT_MESSAGE, SubmitStatus};
pub use error::QueryError;
pub use filter_state::FilterState;
pub use infinite::InfiniteProjects;
pub use location::{Location, MemoryLocation};
pub use observer::{QueryObserver, QueryResult};
pub use projects::{ProjectDetailView, ProjectListView, ProjectPage, ProjectsQueries};
