// src/github/mod.rs
// =============================================================================
// This module loads a GitHub user's repositories for the projects page.
//
// Submodules:
// - model: the repository record we deserialize from the API
// - fetch: the one-shot loader (HTTP + filtering)
// - filter: exclusion rules, language chips and language selection
// - catalog: the page state built from a load result
// =============================================================================

mod catalog;
mod fetch;
mod filter;
mod model;

pub use catalog::{ProjectCatalog, ProjectsView};
pub use fetch::RepoLoader;
pub use filter::LanguageFilter;
pub use model::RepositorySummary;
