//! Typed error enum for the query layer.
//!
//! Query results are shared between every caller attached to the same
//! in-flight request, so the error must be cheap to clone; the client error
//! is kept behind an `Arc` for that reason.

use std::sync::Arc;

use folio_client::ClientError;
use thiserror::Error;

/// Error surfaced to query observers.
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// The underlying API call failed.
    #[error(transparent)]
    Client(Arc<ClientError>),

    /// The background fetch task ended without producing a result.
    #[error("query task aborted: {0}")]
    Aborted(String),
}

impl QueryError {
    /// Whether this error means "the project does not exist" rather than a
    /// transport or server failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Client(e) if e.is_not_found())
    }

    /// Whether the request never reached the server.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Client(e) if e.is_network())
    }

    /// The client error behind this failure, if any.
    #[must_use]
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Client(e) => Some(e),
            Self::Aborted(_) => None,
        }
    }
}

impl From<ClientError> for QueryError {
    fn from(err: ClientError) -> Self {
        Self::Client(Arc::new(err))
    }
}
