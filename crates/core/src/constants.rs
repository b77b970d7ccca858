//! Shared constants for folio.
//!
//! Centralizes API paths, query parameter names and defaults used across crates.

/// Number of projects the API returns per list page.
pub const PAGE_SIZE: usize = 12;

/// First page number of any paginated list.
pub const FIRST_PAGE: u32 = 1;

/// Default API origin when `FOLIO_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Project collection endpoint (trailing slash required by the server router).
pub const PROJECTS_PATH: &str = "/api/projects/";

/// Contact submission endpoint.
pub const CONTACTS_PATH: &str = "/api/contacts/";

/// Current-user endpoint.
pub const CURRENT_USER_PATH: &str = "/api/users/me/";

/// Address-bar parameter carrying the selected statuses.
pub const URL_PARAM_STATUS: &str = "status";

/// Address-bar parameter carrying the selected technology slugs.
pub const URL_PARAM_TECH: &str = "tech";

/// Address-bar parameter carrying the ordering.
pub const URL_PARAM_ORDERING: &str = "ordering";

/// API parameter carrying the selected technology slugs (comma-joined).
pub const API_PARAM_TECHNOLOGIES: &str = "technologies";

/// API parameter carrying the page number.
pub const API_PARAM_PAGE: &str = "page";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Default window in which cached query data is served without refetching.
pub const DEFAULT_QUERY_STALE_SECS: u64 = 30;

/// Default retention of settled, unused cache entries.
pub const DEFAULT_QUERY_GC_SECS: u64 = 300;
