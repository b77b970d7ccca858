//! Project list and detail endpoints.

use folio_core::{
    API_PARAM_PAGE, API_PARAM_TECHNOLOGIES, FIRST_PAGE, PROJECTS_PATH, Page, ProjectDetail,
    ProjectFilters, ProjectListItem, URL_PARAM_ORDERING, URL_PARAM_STATUS,
};

use crate::client::ApiClient;
use crate::error::ClientError;

/// Query parameters for `GET /api/projects/`.
///
/// The server reads `status` as a list, so each selected status is sent as
/// its own parameter. Technologies travel comma-joined in one parameter, and
/// the ordering is only sent when it differs from the server default.
#[must_use]
pub fn list_params(filters: &ProjectFilters, page: u32) -> Vec<(&'static str, String)> {
    let mut params: Vec<(&'static str, String)> = filters
        .status
        .iter()
        .map(|status| (URL_PARAM_STATUS, status.as_str().to_owned()))
        .collect();
    if let Some(technologies) = filters.technologies_csv() {
        params.push((API_PARAM_TECHNOLOGIES, technologies));
    }
    if !filters.ordering.is_default() {
        params.push((URL_PARAM_ORDERING, filters.ordering.as_str().to_owned()));
    }
    params.push((API_PARAM_PAGE, page.max(FIRST_PAGE).to_string()));
    params
}

/// Path of the detail endpoint, with the slug encoded as one path segment.
#[must_use]
pub fn detail_path(slug: &str) -> String {
    format!("{PROJECTS_PATH}{}/", urlencoding::encode(slug))
}

impl ApiClient {
    /// Fetch one page of projects matching `filters`.
    ///
    /// Page numbers start at 1; `0` is treated as the first page.
    ///
    /// # Errors
    /// [`ClientError::Network`] on transport failure, [`ClientError::HttpStatus`]
    /// for non-2xx responses, [`ClientError::Decode`] when the body is not a
    /// page envelope.
    pub async fn list_projects(
        &self,
        filters: &ProjectFilters,
        page: u32,
    ) -> Result<Page<ProjectListItem>, ClientError> {
        let params = list_params(filters, page);
        tracing::debug!(?params, "listing projects");
        let request = self.client.get(self.url(PROJECTS_PATH)).query(&params);
        self.fetch_json(request, "project list", None).await
    }

    /// Fetch the full record for `slug`.
    ///
    /// # Errors
    /// [`ClientError::NotFound`] when the server answers 404, otherwise the
    /// same taxonomy as [`ApiClient::list_projects`].
    pub async fn get_project(&self, slug: &str) -> Result<ProjectDetail, ClientError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(ClientError::InvalidInput("project slug must not be empty".to_owned()));
        }
        tracing::debug!(slug, "fetching project detail");
        let request = self.client.get(self.url(&detail_path(slug)));
        self.fetch_json(request, "project detail", Some(slug)).await
    }
}
