//! "Load more" paging over the project list.

use std::sync::Arc;

use folio_core::{FIRST_PAGE, ProjectFilters, ProjectListItem, QueryKey};

use crate::error::QueryError;
use crate::projects::{ProjectPage, ProjectsQueries};

/// Pages of one filter set, accumulated in request order.
///
/// Each page goes through the list cache, so a page already loaded by the
/// paginated grid is reused rather than requested again.
#[derive(Debug)]
pub struct InfiniteProjects {
    queries: ProjectsQueries,
    filters: ProjectFilters,
    pages: Vec<Arc<ProjectPage>>,
}

impl InfiniteProjects {
    #[must_use]
    pub const fn new(queries: ProjectsQueries, filters: ProjectFilters) -> Self {
        Self { queries, filters, pages: Vec::new() }
    }

    /// Label of this accumulated list. Pages are cached under their
    /// `project_list` keys, not under this one.
    #[must_use]
    pub fn key(&self) -> QueryKey {
        QueryKey::project_infinite(&self.filters)
    }

    #[must_use]
    pub const fn filters(&self) -> &ProjectFilters {
        &self.filters
    }

    #[must_use]
    pub fn pages(&self) -> &[Arc<ProjectPage>] {
        &self.pages
    }

    /// Page number to request next, or `None` once the list is exhausted.
    ///
    /// Loading stops when the server reports no `next` link or when the
    /// last page came back short.
    #[must_use]
    pub fn next_page_param(&self) -> Option<u32> {
        let Some(last) = self.pages.last() else {
            return Some(FIRST_PAGE);
        };
        if !(last.has_more() && last.is_full()) {
            return None;
        }
        u32::try_from(self.pages.len()).ok().and_then(|n| n.checked_add(1))
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.next_page_param().is_some()
    }

    /// Load the next page and append it. Returns `false` without a request
    /// when there is nothing more to load.
    ///
    /// # Errors
    /// The query error of the page request; already loaded pages are kept.
    pub async fn fetch_next_page(&mut self) -> Result<bool, QueryError> {
        let Some(page) = self.next_page_param() else {
            return Ok(false);
        };
        let key = self.key();
        tracing::debug!(%key, page, "loading next page");
        let loaded = self.queries.list(&self.filters, page).await?;
        self.pages.push(loaded);
        Ok(true)
    }

    /// Every loaded project, in page order.
    pub fn items(&self) -> impl Iterator<Item = &ProjectListItem> {
        self.pages.iter().flat_map(|page| page.results.iter())
    }

    /// Total matching projects as reported by the most recent page.
    #[must_use]
    pub fn total_count(&self) -> Option<u64> {
        self.pages.last().map(|page| page.count)
    }

    /// Start over with a different filter set.
    pub fn reset(&mut self, filters: ProjectFilters) {
        self.filters = filters;
        self.pages.clear();
    }
}
