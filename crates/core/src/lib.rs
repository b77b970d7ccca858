//! Core types for folio
//!
//! Domain records, the project filter codec and cache keys shared by the
//! client, query and CLI crates.

mod constants;
mod contact;
mod env_config;
mod error;
pub mod filters;
pub mod json_utils;
mod project;
mod query_key;

pub use constants::*;
pub use contact::*;
pub use env_config::*;
pub use error::*;
pub use filters::ProjectFilters;
pub use project::*;
pub use query_key::*;
