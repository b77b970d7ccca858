//! Project filter state and its address-bar query-string codec.
//!
//! The address bar is the single source of truth for which projects are
//! shown, so the codec is lenient on the way in (unknown tokens are dropped,
//! never rejected) and canonical on the way out (defaults are omitted and set
//! members are written in sorted order, so equal filters produce equal URLs).

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{URL_PARAM_ORDERING, URL_PARAM_STATUS, URL_PARAM_TECH};
use crate::project::{ProjectOrdering, ProjectStatus};

/// User-selected status/technology/ordering combination.
///
/// Both selections are sets: equality and hashing ignore the order in which
/// tags were added.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ProjectFilters {
    #[serde(default)]
    pub status: BTreeSet<ProjectStatus>,
    #[serde(default)]
    pub technologies: BTreeSet<String>,
    #[serde(default)]
    pub ordering: ProjectOrdering,
}

impl ProjectFilters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status.insert(status);
        self
    }

    #[must_use]
    pub fn with_technology(mut self, slug: impl Into<String>) -> Self {
        self.technologies.insert(slug.into());
        self
    }

    #[must_use]
    pub const fn with_ordering(mut self, ordering: ProjectOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// True when nothing is selected and the ordering is the default one.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.status.is_empty() && self.technologies.is_empty() && self.ordering.is_default()
    }

    /// Adds `status` if absent, removes it if present.
    pub fn toggle_status(&mut self, status: ProjectStatus) {
        if !self.status.remove(&status) {
            self.status.insert(status);
        }
    }

    /// Adds `slug` if absent, removes it if present.
    pub fn toggle_technology(&mut self, slug: &str) {
        if !self.technologies.remove(slug) {
            self.technologies.insert(slug.to_owned());
        }
    }

    /// Statuses joined with commas in canonical order, or `None` when empty.
    #[must_use]
    pub fn status_csv(&self) -> Option<String> {
        (!self.status.is_empty())
            .then(|| self.status.iter().map(ProjectStatus::as_str).collect::<Vec<_>>().join(","))
    }

    /// Technology slugs joined with commas in canonical order, or `None` when empty.
    #[must_use]
    pub fn technologies_csv(&self) -> Option<String> {
        (!self.technologies.is_empty())
            .then(|| self.technologies.iter().map(String::as_str).collect::<Vec<_>>().join(","))
    }
}

impl fmt::Display for ProjectFilters {
    /// Canonical query-string form; empty for default filters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self))
    }
}

/// Parse address-bar query parameters into filters.
///
/// Accepts an optional leading `?`. Unknown statuses are dropped, blank
/// technology tokens are dropped, and a missing or unknown ordering falls
/// back to [`ProjectOrdering::Display`]. When a parameter repeats, its first
/// occurrence is used.
#[must_use]
pub fn decode(query: &str) -> ProjectFilters {
    let params = parse_query(query);

    let status = first_param(&params, URL_PARAM_STATUS)
        .map(|raw| raw.split(',').filter_map(|token| token.parse::<ProjectStatus>().ok()).collect())
        .unwrap_or_default();

    let technologies = first_param(&params, URL_PARAM_TECH)
        .map(|raw| {
            raw.split(',').map(str::trim).filter(|t| !t.is_empty()).map(str::to_owned).collect()
        })
        .unwrap_or_default();

    let ordering = first_param(&params, URL_PARAM_ORDERING)
        .and_then(|raw| raw.parse::<ProjectOrdering>().ok())
        .unwrap_or_default();

    ProjectFilters { status, technologies, ordering }
}

/// Serialize filters into a minimal, canonical query-string fragment (no `?`).
///
/// Default values are omitted entirely, so default filters encode to `""`.
#[must_use]
pub fn encode(filters: &ProjectFilters) -> String {
    filter_pairs(filters)
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Rewrite the filter parameters of an existing query string, keeping every
/// unrelated parameter in its original order.
///
/// The filter parameters are appended after the preserved ones.
#[must_use]
pub fn merge_into(existing: &str, filters: &ProjectFilters) -> String {
    let mut parts: Vec<String> = parse_query(existing)
        .into_iter()
        .filter(|(key, _)| !is_filter_param(key))
        .map(|(key, value)| {
            if value.is_empty() {
                urlencoding::encode(&key).into_owned()
            } else {
                format!("{}={}", urlencoding::encode(&key), urlencoding::encode(&value))
            }
        })
        .collect();

    let encoded = encode(filters);
    if !encoded.is_empty() {
        parts.push(encoded);
    }
    parts.join("&")
}

fn filter_pairs(filters: &ProjectFilters) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::with_capacity(3);
    if !filters.status.is_empty() {
        let value = filters.status.iter().map(ProjectStatus::as_str).collect::<Vec<_>>().join(",");
        pairs.push((URL_PARAM_STATUS, value));
    }
    if !filters.technologies.is_empty() {
        let value = filters
            .technologies
            .iter()
            .map(|slug| urlencoding::encode(slug))
            .collect::<Vec<_>>()
            .join(",");
        pairs.push((URL_PARAM_TECH, value));
    }
    if !filters.ordering.is_default() {
        pairs.push((URL_PARAM_ORDERING, filters.ordering.as_str().to_owned()));
    }
    pairs
}

fn is_filter_param(key: &str) -> bool {
    key == URL_PARAM_STATUS || key == URL_PARAM_TECH || key == URL_PARAM_ORDERING
}

/// Split a form-urlencoded query into decoded `(key, value)` pairs.
fn parse_query(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            (decode_component(key).into_owned(), decode_component(value).into_owned())
        })
        .collect()
}

fn decode_component(raw: &str) -> Cow<'_, str> {
    let spaced: Cow<'_, str> =
        if raw.contains('+') { Cow::Owned(raw.replace('+', " ")) } else { Cow::Borrowed(raw) };
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => spaced,
    }
}

fn first_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
}
