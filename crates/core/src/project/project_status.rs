//! Project classification enums.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Delivery status of a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Shipped and no longer under active development
    Completed,
    /// Currently being built
    InProgress,
    /// Not started yet
    Planned,
}

impl ProjectStatus {
    pub const ALL_VARIANTS_STR: &'static str = "completed|in_progress|planned";

    pub const ALL_VARIANTS: &'static [ProjectStatus] =
        &[ProjectStatus::Completed, ProjectStatus::InProgress, ProjectStatus::Planned];

    /// Returns the wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Completed => "completed",
            Self::InProgress => "in_progress",
            Self::Planned => "planned",
        }
    }

    /// Returns the human-readable label shown on filter pills.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match *self {
            Self::Completed => "Completed",
            Self::InProgress => "In Progress",
            Self::Planned => "Planned",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completed" => Ok(Self::Completed),
            "in_progress" => Ok(Self::InProgress),
            "planned" => Ok(Self::Planned),
            other => Err(CoreError::InvalidStatus(other.to_owned())),
        }
    }
}

/// Sort order of the project list.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ProjectOrdering {
    /// Curated display order, newest first within equal rank
    #[default]
    Display,
    /// Most recently created first
    Newest,
    /// Oldest first
    Oldest,
}

impl ProjectOrdering {
    pub const ALL_VARIANTS_STR: &'static str = "display|newest|oldest";

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Display => "display",
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }

    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(*self, Self::Display)
    }
}

impl std::fmt::Display for ProjectOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectOrdering {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "display" => Ok(Self::Display),
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            other => Err(CoreError::InvalidOrdering(other.to_owned())),
        }
    }
}

/// Grouping of a technology on the skills and filter views.
///
/// Categories the client does not know about deserialize as [`TechnologyCategory::Other`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TechnologyCategory {
    Frontend,
    Backend,
    Database,
    Tool,
    #[default]
    #[serde(other)]
    Other,
}

impl TechnologyCategory {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Database => "database",
            Self::Tool => "tool",
            Self::Other => "other",
        }
    }
}

impl FromStr for TechnologyCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "frontend" => Ok(Self::Frontend),
            "backend" => Ok(Self::Backend),
            "database" => Ok(Self::Database),
            "tool" => Ok(Self::Tool),
            "other" => Ok(Self::Other),
            other => Err(CoreError::InvalidCategory(other.to_owned())),
        }
    }
}
