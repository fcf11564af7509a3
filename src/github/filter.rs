// src/github/filter.rs
// =============================================================================
// Exclusion rules and language selection for the repository list.
//
// Exclusion happens once, right after a load:
// 1. forks are dropped
// 2. "hidden" repositories (name starts with the hidden prefix, "." by
//    default, e.g. ".github" or ".dotfiles") are dropped
// 3. optionally, repositories with neither a description nor topics
//
// Selection happens every time the user picks a language chip.
// =============================================================================

use std::collections::HashSet;
use std::fmt;

use super::model::RepositorySummary;

// The pseudo-language that turns filtering off
pub const ALL_LANGUAGES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFilter {
    pub hidden_prefix: String,
    pub require_metadata: bool,
}

impl Default for RepoFilter {
    fn default() -> Self {
        Self {
            hidden_prefix: ".".to_string(),
            require_metadata: false,
        }
    }
}

impl RepoFilter {
    // Applies the exclusion rules, keeping their order
    pub fn apply(&self, repos: Vec<RepositorySummary>) -> Vec<RepositorySummary> {
        repos
            .into_iter()
            .filter(|r| !r.fork)
            .filter(|r| !self.is_hidden(r))
            .filter(|r| !self.require_metadata || r.has_metadata())
            .collect()
    }

    fn is_hidden(&self, repo: &RepositorySummary) -> bool {
        // An empty prefix would match every name
        !self.hidden_prefix.is_empty() && repo.name.starts_with(&self.hidden_prefix)
    }
}

// Which repositories to show: everything, or one language
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LanguageFilter {
    #[default]
    All,
    Language(String),
}

impl LanguageFilter {
    // "All" is the sentinel; anything else is a language label
    pub fn parse(label: &str) -> Self {
        if label == ALL_LANGUAGES {
            LanguageFilter::All
        } else {
            LanguageFilter::Language(label.to_string())
        }
    }

    pub fn matches(&self, repo: &RepositorySummary) -> bool {
        match self {
            LanguageFilter::All => true,
            // Same view of "no language" as the chips: "" never matches
            LanguageFilter::Language(lang) => repo.language_label() == Some(lang.as_str()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LanguageFilter::All => ALL_LANGUAGES,
            LanguageFilter::Language(lang) => lang,
        }
    }
}

impl fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Builds the filter chips: "All" followed by each distinct language in the
// order it first appears.
pub fn language_options(repos: &[RepositorySummary]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut options = vec![ALL_LANGUAGES.to_string()];

    for lang in repos.iter().filter_map(|r| r.language_label()) {
        if seen.insert(lang) {
            options.push(lang.to_string());
        }
    }

    options
}

// Narrows the list to the chosen language
pub fn select<'a>(
    repos: &'a [RepositorySummary],
    filter: &LanguageFilter,
) -> Vec<&'a RepositorySummary> {
    repos.iter().filter(|r| filter.matches(r)).collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::github::catalog::ProjectCatalog;
    use crate::github::model::fixtures::repo;
    use proptest::prelude::*;

    fn arb_language() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some(String::new())),
            prop::sample::select(vec!["Rust", "Go", "TypeScript", "Python"])
                .prop_map(|lang| Some(lang.to_string())),
        ]
    }

    // Any repository: forks, dot-names, blank and repeated languages included
    fn arb_repo() -> impl Strategy<Value = RepositorySummary> {
        (
            any::<u64>(),
            prop_oneof!["[a-z][a-z0-9-]{0,8}", "\\.[a-z]{1,8}"],
            arb_language(),
            any::<bool>(),
        )
            .prop_map(|(id, name, language, fork)| {
                let mut r = repo(id, &name, language.as_deref());
                r.fork = fork;
                r
            })
    }

    // A repository the default exclusion rules keep
    fn arb_kept_repo() -> impl Strategy<Value = RepositorySummary> {
        arb_repo().prop_map(|mut r| {
            r.fork = false;
            r.name = r.name.trim_start_matches('.').to_string();
            r
        })
    }

    proptest! {
        #[test]
        fn proptest_clean_lists_pass_unchanged(repos in prop::collection::vec(arb_kept_repo(), 1..30)) {
            let retained = RepoFilter::default().apply(repos.clone());
            prop_assert_eq!(retained, repos);
        }

        #[test]
        fn proptest_no_forks_or_hidden_survive(repos in prop::collection::vec(arb_repo(), 0..30)) {
            let expected: Vec<u64> = repos
                .iter()
                .filter(|r| !r.fork && !r.name.starts_with('.'))
                .map(|r| r.id)
                .collect();

            let retained = RepoFilter::default().apply(repos);

            prop_assert!(retained.iter().all(|r| !r.fork));
            prop_assert!(retained.iter().all(|r| !r.name.starts_with('.')));
            prop_assert_eq!(retained.iter().map(|r| r.id).collect::<Vec<_>>(), expected);
        }

        #[test]
        fn proptest_one_option_per_language(repos in prop::collection::vec(arb_repo(), 0..30)) {
            let options = language_options(&repos);

            let distinct: HashSet<&str> = repos.iter().filter_map(|r| r.language_label()).collect();
            let unique: HashSet<&String> = options.iter().collect();

            prop_assert_eq!(options[0].as_str(), ALL_LANGUAGES);
            prop_assert_eq!(options.iter().filter(|o| *o == ALL_LANGUAGES).count(), 1);
            prop_assert_eq!(unique.len(), options.len());
            prop_assert_eq!(options.len(), distinct.len() + 1);
            prop_assert!(options[1..].iter().all(|o| distinct.contains(o.as_str())));
        }

        #[test]
        fn proptest_select_all_restores_list(
            repos in prop::collection::vec(arb_kept_repo(), 0..30),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut catalog = ProjectCatalog::new(repos.clone());
            let chosen = pick.get(catalog.languages()).clone();

            catalog.select(LanguageFilter::parse(&chosen));
            catalog.select(LanguageFilter::All);

            let visible: Vec<RepositorySummary> = catalog.visible().into_iter().cloned().collect();
            prop_assert_eq!(visible, repos);
        }

        #[test]
        fn proptest_select_counts_match(repos in prop::collection::vec(arb_kept_repo(), 0..30)) {
            for lang in &language_options(&repos)[1..] {
                let picked = select(&repos, &LanguageFilter::parse(lang));
                let expected = repos
                    .iter()
                    .filter(|r| r.language.as_deref() == Some(lang.as_str()))
                    .count();

                prop_assert!(picked.iter().all(|r| r.language.as_deref() == Some(lang.as_str())));
                prop_assert_eq!(picked.len(), expected);
            }
        }
    }
}
