// src/github/fetch.rs
// =============================================================================
// Loads a user's public repositories from the GitHub REST API.
//
// Strategy:
// - One GET to /users/{user}/repos?sort=updated&per_page=N (N <= 100)
// - Attach a bearer token only when one is configured
// - Read the body as text first, so a non-list body (GitHub answers errors
//   with a JSON object) is reported as a shape error rather than a crash
// - Apply the exclusion filters before handing the list back
//
// There is no retry and no cache: every call goes to the network, and a
// failure never leaves partial results behind.
// =============================================================================

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use url::Url;

use super::filter::RepoFilter;
use super::model::RepositorySummary;
use crate::config::{parse_url, GithubSettings, SettingsError, MAX_PER_PAGE};
use crate::error::{error_message_from_body, FetchError};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
// GitHub rejects API requests that carry no User-Agent
const AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

pub struct RepoLoader {
    client: Client,
    listing_url: Url,
    token: Option<String>,
    filter: RepoFilter,
}

impl RepoLoader {
    // Builds a loader from explicit settings. The user is required here
    // rather than at load time, so a misconfiguration fails before any
    // network traffic.
    pub fn new(settings: &GithubSettings) -> Result<Self, SettingsError> {
        // A blank user is as good as none
        let user = settings
            .user
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(SettingsError::Missing("github.user"))?;

        let listing_url = listing_url(&settings.api_base, user, settings.per_page)?;

        // One client per loader; the timeout covers connect + body
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            listing_url,
            // An empty token would send "Bearer " and earn a 401
            token: settings.token.clone().filter(|t| !t.trim().is_empty()),
            filter: RepoFilter {
                hidden_prefix: settings.hidden_prefix.clone(),
                require_metadata: settings.require_metadata,
            },
        })
    }

    // Fetches, parses and filters the repository list
    pub async fn load(&self) -> Result<Vec<RepositorySummary>, FetchError> {
        tracing::info!(url = %self.listing_url, "loading repositories");

        // GitHub wants its own media type and a User-Agent on every call
        let mut request = self
            .client
            .get(self.listing_url.clone())
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, AGENT);

        // Anonymous calls work too, just with a lower rate limit
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        // Both awaits map reqwest errors to FetchError::Network via `?`
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Status first: a 403 body is JSON too, just not a list
        if !status.is_success() {
            let message = error_message_from_body(&body);
            tracing::warn!(%status, message = ?message, "repository listing failed");
            return Err(FetchError::Remote { status, message });
        }

        // All-or-nothing: one bad record fails the whole load
        let repos = parse_listing(&body)?;
        let total = repos.len();
        let retained = self.filter.apply(repos);

        tracing::debug!(total, retained = retained.len(), "repositories filtered");
        Ok(retained)
    }
}

// Builds {api_base}/users/{user}/repos?sort=updated&per_page=N
fn listing_url(api_base: &str, user: &str, per_page: u32) -> Result<Url, SettingsError> {
    let mut listing = parse_url("github.api_base", api_base)?;
    // GitHub ignores anything above 100; zero would mean "default page"
    let per_page = per_page.clamp(1, MAX_PER_PAGE);

    // pop_if_empty drops the trailing "/" of bases like ".../api/v3/"

    listing
        .path_segments_mut()
        .map_err(|_| SettingsError::InvalidUrl {
            key: "github.api_base",
            source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
        })?
        .pop_if_empty()
        .extend(["users", user, "repos"]);

    listing
        .query_pairs_mut()
        .append_pair("sort", "updated")
        .append_pair("per_page", &per_page.to_string());

    Ok(listing)
}

// Parses the body strictly as a list of repositories
fn parse_listing(body: &str) -> Result<Vec<RepositorySummary>, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Shape(e.to_string()))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why read the body with .text() instead of .json()?
//    - .json() would fail the same way for "bad JSON" and "JSON of the wrong
//      shape", and we could not read GitHub's error message on a 403
//    - Reading text first lets us decide: status first, then shape
//
// 2. What does `?` do with a reqwest::Error here?
//    - FetchError implements From<reqwest::Error>, so `?` converts it into
//      FetchError::Network automatically
//
// 3. Why is the loader built from &GithubSettings?
//    - All inputs (user, token, page size) are explicit, so two loaders
//      never share hidden state and tests can point one at a mock server
// -----------------------------------------------------------------------------
