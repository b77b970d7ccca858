//! Cache keys for project queries.
//!
//! A key is derived from the logical parameters of a request only. Because
//! [`ProjectFilters`] stores its selections as ordered sets, two filter values
//! built in different orders produce equal keys, while any differing field
//! (page included) produces a different key.

use std::fmt;

use crate::filters::{ProjectFilters, encode};

/// Opaque, comparable token identifying one cached query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueryKey {
    /// One page of the filtered project list.
    ProjectList { filters: ProjectFilters, page: u32 },
    /// The accumulated "load more" list for one filter set.
    ProjectInfinite { filters: ProjectFilters },
    /// A single project looked up by slug.
    ProjectDetail { slug: String },
    /// The signed-in user lookup.
    CurrentUser,
}

impl QueryKey {
    #[must_use]
    pub fn project_list(filters: &ProjectFilters, page: u32) -> Self {
        Self::ProjectList { filters: filters.clone(), page }
    }

    #[must_use]
    pub fn project_infinite(filters: &ProjectFilters) -> Self {
        Self::ProjectInfinite { filters: filters.clone() }
    }

    #[must_use]
    pub fn project_detail(slug: &str) -> Self {
        Self::ProjectDetail { slug: slug.to_owned() }
    }

    /// Whether the key belongs to the `projects` family (list, infinite or detail).
    #[must_use]
    pub const fn is_project(&self) -> bool {
        matches!(
            *self,
            Self::ProjectList { .. } | Self::ProjectInfinite { .. } | Self::ProjectDetail { .. }
        )
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProjectList { filters, page } => {
                write!(f, "projects/list/{}/{page}", display_filters(filters))
            },
            Self::ProjectInfinite { filters } => {
                write!(f, "projects/infinite/{}", display_filters(filters))
            },
            Self::ProjectDetail { slug } => write!(f, "projects/detail/{slug}"),
            Self::CurrentUser => f.write_str("users/me"),
        }
    }
}

fn display_filters(filters: &ProjectFilters) -> String {
    let encoded = encode(filters);
    if encoded.is_empty() { "-".to_owned() } else { encoded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{ProjectOrdering, ProjectStatus};
    use std::collections::HashSet;

    #[test]
    fn equal_filters_in_different_order_give_equal_keys() {
        let f1 = ProjectFilters::new()
            .with_status(ProjectStatus::Completed)
            .with_status(ProjectStatus::Planned)
            .with_technology("rust")
            .with_technology("go");
        let f2 = ProjectFilters::new()
            .with_technology("go")
            .with_status(ProjectStatus::Planned)
            .with_technology("rust")
            .with_status(ProjectStatus::Completed);
        assert_eq!(QueryKey::project_list(&f1, 1), QueryKey::project_list(&f2, 1));

        let mut seen = HashSet::new();
        seen.insert(QueryKey::project_list(&f1, 1));
        assert!(seen.contains(&QueryKey::project_list(&f2, 1)));
    }

    #[test]
    fn page_changes_key() {
        let f = ProjectFilters::new();
        assert_ne!(QueryKey::project_list(&f, 1), QueryKey::project_list(&f, 2));
    }

    #[test]
    fn any_filter_field_changes_key() {
        let base = ProjectFilters::new();
        let key = QueryKey::project_list(&base, 1);
        assert_ne!(key, QueryKey::project_list(&base.clone().with_status(ProjectStatus::Planned), 1));
        assert_ne!(key, QueryKey::project_list(&base.clone().with_technology("rust"), 1));
        assert_ne!(
            key,
            QueryKey::project_list(&base.clone().with_ordering(ProjectOrdering::Oldest), 1)
        );
    }

    #[test]
    fn list_detail_and_infinite_never_collide() {
        let f = ProjectFilters::new();
        assert_ne!(QueryKey::project_list(&f, 1), QueryKey::project_infinite(&f));
        assert_ne!(QueryKey::project_detail("a"), QueryKey::project_detail("b"));
        assert!(QueryKey::project_detail("a").is_project());
        assert!(!QueryKey::CurrentUser.is_project());
    }

    #[test]
    fn display_is_stable() {
        let f = ProjectFilters::new().with_status(ProjectStatus::Completed);
        assert_eq!(QueryKey::project_list(&f, 3).to_string(), "projects/list/status=completed/3");
        assert_eq!(QueryKey::project_list(&ProjectFilters::new(), 1).to_string(), "projects/list/-/1");
        assert_eq!(QueryKey::project_detail("folio").to_string(), "projects/detail/folio");
    }
}
