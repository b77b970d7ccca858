//! Filter state controller.
//!
//! The location's query string is the only copy of the filter state: every
//! read decodes it and every write encodes the new state back into it, so a
//! reload or a shared link reproduces the same filtered view.

use folio_core::filters::{decode, merge_into};
use folio_core::{ProjectFilters, ProjectOrdering, ProjectStatus};

use crate::location::Location;

#[derive(Debug)]
pub struct FilterState<L> {
    location: L,
}

impl<L: Location> FilterState<L> {
    #[must_use]
    pub const fn new(location: L) -> Self {
        Self { location }
    }

    #[must_use]
    pub const fn location(&self) -> &L {
        &self.location
    }

    /// Filters currently encoded in the location.
    #[must_use]
    pub fn read(&self) -> ProjectFilters {
        decode(&self.location.query())
    }

    /// Apply `f` to the current filters and write the result back, replacing
    /// the current navigation entry. Unrelated query parameters are kept.
    pub fn update(&self, f: impl FnOnce(ProjectFilters) -> ProjectFilters) -> ProjectFilters {
        let current_query = self.location.query();
        let next = f(decode(&current_query));
        let next_query = merge_into(&current_query, &next);
        tracing::debug!(from = %current_query, to = %next_query, "replacing filter query");
        self.location.replace_query(&next_query);
        next
    }

    pub fn toggle_status(&self, status: ProjectStatus) -> ProjectFilters {
        self.update(|mut filters| {
            filters.toggle_status(status);
            filters
        })
    }

    pub fn toggle_technology(&self, slug: &str) -> ProjectFilters {
        self.update(|mut filters| {
            filters.toggle_technology(slug);
            filters
        })
    }

    pub fn set_ordering(&self, ordering: ProjectOrdering) -> ProjectFilters {
        self.update(|filters| filters.with_ordering(ordering))
    }

    pub fn reset_all(&self) -> ProjectFilters {
        self.update(|_| ProjectFilters::default())
    }
}
