//! Typed error enum for the client crate.

use thiserror::Error;

/// Errors from API operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP status {code}: {}", detail.as_deref().unwrap_or("no detail"))]
    HttpStatus { code: u16, detail: Option<String> },
    #[error("failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl ClientError {
    /// Whether the requested resource does not exist (HTTP 404 on a detail lookup).
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(*self, Self::NotFound(_))
    }

    /// Whether the request never produced an HTTP response.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(*self, Self::Network(_))
    }

    /// HTTP status code, when the failure carries one.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { code, .. } => Some(*code),
            Self::NotFound(_) => Some(404),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Server-provided message suitable for showing verbatim to the user.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}
