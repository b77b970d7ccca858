//! Typed error enum for the core crate.

use thiserror::Error;

/// Errors from parsing domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoreError {
    #[error("invalid project status: {0}")]
    InvalidStatus(String),

    #[error("invalid project ordering: {0}")]
    InvalidOrdering(String),

    #[error("invalid technology category: {0}")]
    InvalidCategory(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
