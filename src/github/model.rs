// src/github/model.rs
// =============================================================================
// The repository record returned by GitHub's "list repositories for a user"
// endpoint, reduced to the fields the projects page shows.
//
// Records are immutable snapshots: we fetch them fresh on every load and
// never write anything back.
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Shown on a project card when the repository has no description
pub const NO_DESCRIPTION: &str = "No description provided.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    /// Unique id assigned by GitHub
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    /// The repository page on github.com
    pub html_url: String,
    /// Project website, if the owner set one (GitHub sends "" when unset)
    pub homepage: Option<String>,
    /// Primary language as detected by GitHub
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub fork: bool,
}

impl RepositorySummary {
    /// The homepage URL, ignoring the empty string GitHub uses for "unset".
    pub fn live_demo(&self) -> Option<&str> {
        self.homepage
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }

    /// True when the repository has a description or at least one topic.
    pub fn has_metadata(&self) -> bool {
        let described = self
            .description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty());
        described || !self.topics.is_empty()
    }

    pub fn description_or_default(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.trim().is_empty() => d,
            _ => NO_DESCRIPTION,
        }
    }

    // Language label, treating "" the same as no language at all
    pub fn language_label(&self) -> Option<&str> {
        self.language.as_deref().filter(|l| !l.is_empty())
    }
}
