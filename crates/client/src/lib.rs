//! HTTP client for the portfolio API
//!
//! Typed requests for the project list/detail, contact and current-user
//! endpoints, with a single error taxonomy ([`ClientError`]).

mod client;
mod contacts;
mod error;
mod projects;
mod users;


pub use client::{API_URL_ENV, ApiClient, HTTP_TIMEOUT_ENV, extract_detail};
pub use contacts::ContactAck;
pub use error::ClientError;
pub use projects::{detail_path, list_params};
