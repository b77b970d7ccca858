use anyhow::{Context, Result};
use clap::Args;
use folio_client::{ApiClient, HTTP_TIMEOUT_ENV};
use folio_core::filters::decode;
use folio_core::{DEFAULT_HTTP_TIMEOUT_SECS, ProjectFilters, ProjectOrdering, ProjectStatus, env_secs};

pub(crate) mod contact;
pub(crate) mod filters;
pub(crate) mod projects;
pub(crate) mod users;

/// Filter selection shared by the project and filter commands.
#[derive(Args, Debug, Default)]
pub(crate) struct FilterArgs {
    /// Status tags, comma-separated (completed, in_progress, planned)
    #[arg(long, value_delimiter = ',')]
    status: Vec<ProjectStatus>,
    /// Technology slugs, comma-separated
    #[arg(long, value_delimiter = ',')]
    tech: Vec<String>,
    #[arg(long)]
    ordering: Option<ProjectOrdering>,
    /// Start from the selection encoded in this query string
    #[arg(long)]
    query: Option<String>,
}

impl FilterArgs {
    pub(crate) fn to_filters(&self) -> ProjectFilters {
        let mut filters = self.query.as_deref().map(decode).unwrap_or_default();
        filters.status.extend(self.status.iter().copied());
        filters.technologies.extend(
            self.tech.iter().map(|t| t.trim()).filter(|t| !t.is_empty()).map(str::to_owned),
        );
        if let Some(ordering) = self.ordering {
            filters.ordering = ordering;
        }
        filters
    }
}

pub(crate) fn api_client(api_url: &str) -> Result<ApiClient> {
    ApiClient::with_timeout(api_url, env_secs(HTTP_TIMEOUT_ENV, DEFAULT_HTTP_TIMEOUT_SECS))
        .with_context(|| format!("invalid API URL: {api_url}"))
}
