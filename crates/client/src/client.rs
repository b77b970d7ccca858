use std::time::Duration;

use folio_core::{
    DEFAULT_API_URL, DEFAULT_HTTP_TIMEOUT_SECS, env_secs, env_string,
    json_utils::truncate,
};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Environment variable holding the API origin.
pub const API_URL_ENV: &str = "FOLIO_API_URL";
/// Environment variable holding the request timeout in seconds.
pub const HTTP_TIMEOUT_ENV: &str = "FOLIO_HTTP_TIMEOUT_SECS";

/// Maximum body excerpt carried in decode errors.
const MAX_BODY_EXCERPT: usize = 200;

/// Client for the portfolio REST API.
///
/// Pure translation between typed requests and HTTP: no caching and no
/// retries. Cloning is cheap and shares the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client for the API at `base_url` with the default timeout.
    ///
    /// # Errors
    /// Returns an error if the base URL is blank or the HTTP client cannot be
    /// built (TLS backend failure).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
    }

    /// Creates a client with an explicit request timeout.
    ///
    /// # Errors
    /// Same as [`ApiClient::new`].
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            return Err(ClientError::InvalidInput("base URL must not be empty".to_owned()));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::ClientInit(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Creates a client from `FOLIO_API_URL` and `FOLIO_HTTP_TIMEOUT_SECS`.
    ///
    /// # Errors
    /// Same as [`ApiClient::new`].
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = env_string(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        Self::with_timeout(base_url, env_secs(HTTP_TIMEOUT_ENV, DEFAULT_HTTP_TIMEOUT_SECS))
    }

    /// Returns the normalized base URL (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a reference to the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &reqwest::Client {
        &self.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the status with the raw body.
    ///
    /// # Errors
    /// Returns [`ClientError::Network`] when no response arrives or the body
    /// cannot be read.
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
    ) -> Result<(StatusCode, String), ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "API response");
        Ok((status, body))
    }

    /// Send a GET-style request and decode a successful JSON body.
    ///
    /// `not_found` names the resource for [`ClientError::NotFound`]; when it
    /// is `None` a 404 is reported like any other non-success status.
    pub(crate) async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
        not_found: Option<&str>,
    ) -> Result<T, ClientError> {
        let (status, body) = self.send(request).await?;
        if status == StatusCode::NOT_FOUND {
            if let Some(resource) = not_found {
                return Err(ClientError::NotFound(resource.to_owned()));
            }
        }
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        decode_body(&body, context)
    }
}

/// Build the error for a non-success response, keeping any server message.
pub(crate) fn status_error(status: StatusCode, body: &str) -> ClientError {
    ClientError::HttpStatus { code: status.as_u16(), detail: extract_detail(body) }
}

pub(crate) fn decode_body<T: DeserializeOwned>(body: &str, context: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Decode {
        context: format!("{context} (body: {})", truncate(body, MAX_BODY_EXCERPT)),
        source: e,
    })
}

/// Pull a user-facing message out of an error body.
///
/// Prefers a top-level `detail` string. Falls back to field validation errors
/// (`{"email": ["Enter a valid email address."]}`) rendered as
/// `email: Enter a valid email address.`.
#[must_use]
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    if let Some(detail) = object.get("detail").and_then(serde_json::Value::as_str) {
        return Some(detail.to_owned());
    }

    let field_errors: Vec<String> = object
        .iter()
        .filter_map(|(field, messages)| {
            let text = match messages {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Array(items) => items
                    .iter()
                    .filter_map(serde_json::Value::as_str)
                    .collect::<Vec<_>>()
                    .join(" "),
                _ => return None,
            };
            (!text.is_empty()).then(|| format!("{field}: {text}"))
        })
        .collect();

    (!field_errors.is_empty()).then(|| field_errors.join("; "))
}
