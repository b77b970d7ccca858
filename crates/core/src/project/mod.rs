//! Project records as returned by the projects API.

mod project_status;

pub use project_status::*;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::PAGE_SIZE;
use crate::json_utils::{empty_string_as_none, null_as_default};

/// A technology tag referenced by projects. Read-only from the client side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Technology {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub category: TechnologyCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectImage {
    pub id: u64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub order: i32,
}

/// Summary record shown on the projects grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectListItem {
    pub id: u64,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    pub status: ProjectStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technologies: Vec<Technology>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub live_demo_url: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub source_code_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChallengeSolution {
    pub challenge: String,
    pub solution: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchitectureStage {
    pub name: String,
    pub description: String,
}

/// One value of the architectural overview map: free text, or the ordered
/// list of pipeline stages under the `stages` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ArchitectureEntry {
    Text(String),
    Stages(Vec<ArchitectureStage>),
}

/// Full case-study record for the project detail page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectDetail {
    pub id: u64,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub problem_statement: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_features: Vec<String>,
    #[serde(default)]
    pub my_role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technical_challenges_solutions: Vec<ChallengeSolution>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub architectural_overview: BTreeMap<String, ArchitectureEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub future_enhancements: Vec<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub live_demo_url: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub source_code_url: Option<String>,
    pub status: ProjectStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technologies: Vec<Technology>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ProjectImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectDetail {
    /// Images in display order.
    #[must_use]
    pub fn ordered_images(&self) -> Vec<&ProjectImage> {
        let mut images: Vec<&ProjectImage> = self.images.iter().collect();
        images.sort_by_key(|img| (img.order, img.id));
        images
    }
}

/// Paginated list envelope.
///
/// `next`/`previous` are opaque cursors (absolute URLs in practice); `next`
/// is present iff more pages exist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.next.is_some()
    }

    /// Whether this page is full, i.e. holds exactly a page size worth of results.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.results.len() >= PAGE_SIZE
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { count: 0, next: None, previous: None, results: Vec::new() }
    }
}
