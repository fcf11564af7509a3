// src/github/catalog.rs
// =============================================================================
// The projects page state: a loaded list, its language chips, the active
// chip, and the "featured" project.
//
// Featured is positional: it is whatever comes first in the currently
// visible list, so it changes when the language filter changes.
// =============================================================================

use super::filter::{language_options, select, LanguageFilter};
use super::model::RepositorySummary;
use crate::error::FetchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCatalog {
    repos: Vec<RepositorySummary>,
    languages: Vec<String>,
    active: LanguageFilter,
}

impl ProjectCatalog {
    pub fn new(repos: Vec<RepositorySummary>) -> Self {
        let languages = language_options(&repos);
        Self {
            repos,
            languages,
            active: LanguageFilter::All,
        }
    }

    /// Every retained repository, regardless of the active filter.
    pub fn repos(&self) -> &[RepositorySummary] {
        &self.repos
    }

    /// "All" plus each distinct language, for the filter chips.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn active(&self) -> &LanguageFilter {
        &self.active
    }

    pub fn select(&mut self, filter: LanguageFilter) {
        tracing::debug!(filter = %filter, "language filter changed");
        self.active = filter;
    }

    pub fn visible(&self) -> Vec<&RepositorySummary> {
        select(&self.repos, &self.active)
    }

    pub fn featured(&self) -> Option<&RepositorySummary> {
        self.repos.iter().find(|r| self.active.matches(r))
    }

    // Everything visible except the featured entry
    pub fn others(&self) -> Vec<&RepositorySummary> {
        self.visible().into_iter().skip(1).collect()
    }
}

// What the projects page is showing right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectsView {
    Loading,
    Failed(String),
    Ready(ProjectCatalog),
}

impl ProjectsView {
    pub fn from_load(result: Result<Vec<RepositorySummary>, FetchError>) -> Self {
        match result {
            Ok(repos) => ProjectsView::Ready(ProjectCatalog::new(repos)),
            Err(e) => ProjectsView::Failed(format!("Unable to load projects: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::model::fixtures::repo;
    use reqwest::StatusCode;

    fn catalog() -> ProjectCatalog {
        ProjectCatalog::new(vec![
            repo(1, "site", Some("TypeScript")),
            repo(2, "engine", Some("Rust")),
            repo(3, "tools", Some("Rust")),
        ])
    }

    #[test]
    fn test_featured_is_first_visible() {
        let mut c = catalog();
        assert_eq!(c.featured().map(|r| r.id), Some(1));
        assert_eq!(c.others().iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 3]);

        c.select(LanguageFilter::parse("Rust"));
        assert_eq!(c.featured().map(|r| r.id), Some(2));
        assert_eq!(c.others().iter().map(|r| r.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_no_featured_when_filter_matches_nothing() {
        let mut c = catalog();
        c.select(LanguageFilter::parse("Haskell"));
        assert!(c.featured().is_none());
        assert!(c.others().is_empty());
    }

    #[test]
    fn test_select_round_trip() {
        let mut c = catalog();
        let before: Vec<u64> = c.visible().iter().map(|r| r.id).collect();

        c.select(LanguageFilter::parse("TypeScript"));
        c.select(LanguageFilter::All);

        let after: Vec<u64> = c.visible().iter().map(|r| r.id).collect();
        assert_eq!(before, after);
        assert_eq!(c.active(), &LanguageFilter::All);
    }

    #[test]
    fn test_languages_derived_once() {
        assert_eq!(catalog().languages(), &["All", "TypeScript", "Rust"]);
    }

    #[test]
    fn test_failed_view_carries_message() {
        let view = ProjectsView::from_load(Err(FetchError::Remote {
            status: StatusCode::FORBIDDEN,
            message: Some("API rate limit exceeded".to_string()),
        }));

        match view {
            ProjectsView::Failed(msg) => assert!(msg.contains("API rate limit exceeded")),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
