//! Project queries wired to the API client.

use std::sync::Arc;

use folio_client::{ApiClient, ClientError};
use folio_core::{Page, ProjectDetail, ProjectFilters, ProjectListItem, QueryKey};

use futures_util::future::BoxFuture;

use crate::cache::QueryCache;
use crate::config::QueryConfig;
use crate::error::QueryError;
use crate::observer::{QueryObserver, QueryResult};

pub type ProjectPage = Page<ProjectListItem>;

type BoxedFetch<T> = BoxFuture<'static, Result<T, ClientError>>;

/// Cached, de-duplicated access to the project list and detail endpoints.
///
/// Cloning is cheap; clones share the client and both caches.
#[derive(Debug, Clone)]
pub struct ProjectsQueries {
    client: ApiClient,
    lists: QueryCache<ProjectPage>,
    details: QueryCache<ProjectDetail>,
}

impl ProjectsQueries {
    #[must_use]
    pub fn new(client: ApiClient, config: QueryConfig) -> Self {
        Self { client, lists: QueryCache::new(config), details: QueryCache::new(config) }
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub const fn list_cache(&self) -> &QueryCache<ProjectPage> {
        &self.lists
    }

    #[must_use]
    pub const fn detail_cache(&self) -> &QueryCache<ProjectDetail> {
        &self.details
    }

    /// One page of projects for `filters`, served from cache when fresh.
    ///
    /// # Errors
    /// The client error of the request, shared with every concurrent caller.
    pub async fn list(
        &self,
        filters: &ProjectFilters,
        page: u32,
    ) -> Result<Arc<ProjectPage>, QueryError> {
        let key = QueryKey::project_list(filters, page);
        self.lists.fetch(key, self.list_fetcher(filters, page)).await
    }

    /// Project detail for `slug`, served from cache when fresh.
    ///
    /// # Errors
    /// A not-found error ([`QueryError::is_not_found`]) when the slug is unknown.
    pub async fn detail(&self, slug: &str) -> Result<Arc<ProjectDetail>, QueryError> {
        let key = QueryKey::project_detail(slug);
        self.details.fetch(key, self.detail_fetcher(slug)).await
    }

    /// Mark every cached list page and detail stale, e.g. after a project was
    /// added or edited elsewhere.
    pub fn invalidate_all(&self) -> usize {
        let lists = self.lists.invalidate_where(QueryKey::is_project);
        let details = self.details.invalidate_where(QueryKey::is_project);
        lists.saturating_add(details)
    }

    /// Observer for the projects grid.
    #[must_use]
    pub fn list_view(&self) -> ProjectListView {
        ProjectListView {
            observer: QueryObserver::new(self.lists.clone()),
            queries: self.clone(),
        }
    }

    /// Observer for the project detail page.
    #[must_use]
    pub fn detail_view(&self) -> ProjectDetailView {
        ProjectDetailView {
            observer: QueryObserver::new(self.details.clone()),
            queries: self.clone(),
        }
    }

    fn list_fetcher(
        &self,
        filters: &ProjectFilters,
        page: u32,
    ) -> impl Fn() -> BoxedFetch<ProjectPage> + Send + Sync + 'static {
        let client = self.client.clone();
        let filters = filters.clone();
        move || {
            let client = client.clone();
            let filters = filters.clone();
            Box::pin(async move { client.list_projects(&filters, page).await })
        }
    }

    fn detail_fetcher(
        &self,
        slug: &str,
    ) -> impl Fn() -> BoxedFetch<ProjectDetail> + Send + Sync + 'static {
        let client = self.client.clone();
        let slug = slug.to_owned();
        move || {
            let client = client.clone();
            let slug = slug.clone();
            Box::pin(async move { client.get_project(&slug).await })
        }
    }
}

/// The projects grid: follows one `(filters, page)` at a time and keeps the
/// previous page visible while the next one loads.
#[derive(Debug)]
pub struct ProjectListView {
    observer: QueryObserver<ProjectPage>,
    queries: ProjectsQueries,
}

impl ProjectListView {
    /// Show `page` of the projects matching `filters`.
    pub fn show(&self, filters: &ProjectFilters, page: u32) {
        let key = QueryKey::project_list(filters, page);
        self.observer.set_key(key, self.queries.list_fetcher(filters, page));
    }

    pub fn refetch(&self) {
        self.observer.refetch();
    }

    #[must_use]
    pub fn current(&self) -> QueryResult<ProjectPage> {
        self.observer.current()
    }

    pub async fn settled(&self) -> QueryResult<ProjectPage> {
        self.observer.settled().await
    }

    #[must_use]
    pub const fn observer(&self) -> &QueryObserver<ProjectPage> {
        &self.observer
    }
}

/// The detail page: follows one slug; `None` disables the query.
#[derive(Debug)]
pub struct ProjectDetailView {
    observer: QueryObserver<ProjectDetail>,
    queries: ProjectsQueries,
}

impl ProjectDetailView {
    pub fn show(&self, slug: Option<&str>) {
        match slug.map(str::trim).filter(|s| !s.is_empty()) {
            Some(slug) => {
                let key = QueryKey::project_detail(slug);
                self.observer.set_key(key, self.queries.detail_fetcher(slug));
            },
            None => self.observer.clear(),
        }
    }

    pub fn refetch(&self) {
        self.observer.refetch();
    }

    #[must_use]
    pub fn current(&self) -> QueryResult<ProjectDetail> {
        self.observer.current()
    }

    pub async fn settled(&self) -> QueryResult<ProjectDetail> {
        self.observer.settled().await
    }

    #[must_use]
    pub const fn observer(&self) -> &QueryObserver<ProjectDetail> {
        &self.observer
    }
}
