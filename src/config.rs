// src/config.rs
// =============================================================================
// Layered settings for both flows.
//
// Sources, lowest priority first:
// 1. built-in defaults
// 2. ~/.config/folio/folio.toml (optional)
// 3. ./folio.toml (optional)
// 4. the file given with --config (required if given)
// 5. FOLIO_* environment variables, e.g. FOLIO_GITHUB__TOKEN
//
// CLI flags are applied on top by main.rs. Nothing here is global: the
// loaded Settings are handed to the loader and submitter when they are built.
// =============================================================================

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
// GitHub's hard limit for per_page
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("missing setting '{0}' (set it in folio.toml, the environment, or on the command line)")]
    Missing(&'static str),

    #[error("setting '{key}' is not a valid URL: {source}")]
    InvalidUrl {
        key: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub github: GithubSettings,
    #[serde(default)]
    pub contact: ContactSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubSettings {
    /// Whose repositories to list
    pub user: Option<String>,
    /// Optional static token, sent as a bearer token
    pub token: Option<String>,
    pub api_base: String,
    /// Clamped to 1..=100 when the request is built
    pub per_page: u32,
    pub hidden_prefix: String,
    /// Drop repositories with neither description nor topics
    pub require_metadata: bool,
    pub timeout_secs: u64,
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            user: None,
            token: None,
            api_base: DEFAULT_API_BASE.to_string(),
            per_page: MAX_PER_PAGE,
            hidden_prefix: ".".to_string(),
            require_metadata: false,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSettings {
    /// Form-processing endpoint the message is POSTed to
    pub endpoint: Option<String>,
    /// Maximum message length in characters
    pub message_limit: Option<usize>,
}

impl Settings {
    // Loads all layers. `explicit` is the --config path, if any.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        SettingsLoader::standard(explicit).load()
    }
}

// Which sources a load reads. `standard` is what the binary uses; tests
// start from `isolated` so local files and the environment cannot leak in.
pub struct SettingsLoader {
    files: Vec<(PathBuf, bool)>,
    environment: Option<Environment>,
    token_fallback: Option<String>,
}

impl SettingsLoader {
    pub fn standard(explicit: Option<&Path>) -> Self {
        let mut files = Vec::new();

        // User-wide file first, then the one in the working directory
        if let Some(user_path) = user_config_path() {
            files.push((user_path, false));
        }
        files.push((PathBuf::from("folio.toml"), false));

        let loader = Self {
            files,
            environment: Some(folio_environment()),
            token_fallback: std::env::var("GITHUB_TOKEN").ok(),
        };

        match explicit {
            Some(path) => loader.file(path),
            None => loader,
        }
    }

    // Defaults only, nothing read from disk or the environment
    pub fn isolated() -> Self {
        Self {
            files: Vec::new(),
            environment: None,
            token_fallback: None,
        }
    }

    // Adds a required file, applied after the ones already listed
    pub fn file(mut self, path: &Path) -> Self {
        self.files.push((path.to_path_buf(), true));
        self
    }

    #[cfg(test)]
    fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    #[cfg(test)]
    fn token_fallback(mut self, token: &str) -> Self {
        self.token_fallback = Some(token.to_string());
        self
    }

    pub fn load(self) -> Result<Settings, SettingsError> {
        let mut builder = Config::builder()
            .set_default("github.api_base", DEFAULT_API_BASE)?
            .set_default("github.per_page", MAX_PER_PAGE as i64)?
            .set_default("github.hidden_prefix", ".")?
            .set_default("github.require_metadata", false)?
            .set_default("github.timeout_secs", 30_i64)?;

        for (path, required) in self.files {
            builder = builder.add_source(File::from(path).required(required));
        }

        // Environment variables win over every file
        if let Some(environment) = self.environment {
            builder = builder.add_source(environment);
        }

        let mut settings: Settings = builder.build()?.try_deserialize()?;

        // GITHUB_TOKEN is only a fallback; an explicit token always wins
        if settings.github.token.is_none() {
            settings.github.token = self.token_fallback.filter(|t| !t.trim().is_empty());
        }

        tracing::debug!(
            user = ?settings.github.user,
            api_base = %settings.github.api_base,
            has_token = settings.github.token.is_some(),
            "settings loaded"
        );

        Ok(settings)
    }
}

// FOLIO_GITHUB__TOKEN -> github.token
fn folio_environment() -> Environment {
    Environment::with_prefix("FOLIO")
        .prefix_separator("_")
        .separator("__")
}

// ~/.config/folio/folio.toml
pub fn user_config_path() -> Option<PathBuf> {
    let mut path = dirs::home_dir()?;
    path.push(".config");
    path.push("folio");
    path.push("folio.toml");
    Some(path)
}

// Parses a configured URL, naming the setting in the error
pub fn parse_url(key: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|source| SettingsError::InvalidUrl { key, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_files() {
        let settings = SettingsLoader::isolated().load().unwrap();
        assert_eq!(settings.github.api_base, DEFAULT_API_BASE);
        assert_eq!(settings.github.per_page, 100);
        assert_eq!(settings.github.hidden_prefix, ".");
        assert_eq!(settings.github.token, None);
        assert!(!settings.github.require_metadata);
        assert_eq!(settings.contact.endpoint, None);
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let file = toml_file(
            r#"
[github]
user = "octocat"
per_page = 30
require_metadata = true

[contact]
endpoint = "https://forms.example/f/abc"
message_limit = 500
"#,
        );

        let settings = SettingsLoader::isolated().file(file.path()).load().unwrap();
        assert_eq!(settings.github.user.as_deref(), Some("octocat"));
        assert_eq!(settings.github.per_page, 30);
        assert!(settings.github.require_metadata);
        assert_eq!(
            settings.contact.endpoint.as_deref(),
            Some("https://forms.example/f/abc")
        );
        assert_eq!(settings.contact.message_limit, Some(500));
    }

    #[test]
    fn test_large_page_size_is_accepted() {
        // Clamping happens when the listing URL is built
        let file = toml_file("[github]\nper_page = 300\n");
        let settings = SettingsLoader::isolated().file(file.path()).load().unwrap();
        assert_eq!(settings.github.per_page, 300);
    }

    #[test]
    fn test_environment_overrides_files() {
        let file = toml_file("[github]\nuser = \"from-file\"\n");
        let env = folio_environment().source(Some(
            [
                ("FOLIO_GITHUB__USER".to_string(), "from-env".to_string()),
                ("FOLIO_GITHUB__TOKEN".to_string(), "env-token".to_string()),
            ]
            .into_iter()
            .collect(),
        ));

        let settings = SettingsLoader::isolated()
            .file(file.path())
            .environment(env)
            .token_fallback("fallback-token")
            .load()
            .unwrap();

        assert_eq!(settings.github.user.as_deref(), Some("from-env"));
        assert_eq!(settings.github.token.as_deref(), Some("env-token"));
    }

    #[test]
    fn test_token_fallback_fills_missing_token() {
        let settings = SettingsLoader::isolated()
            .token_fallback("fallback-token")
            .load()
            .unwrap();
        assert_eq!(settings.github.token.as_deref(), Some("fallback-token"));

        let settings = SettingsLoader::isolated().token_fallback("  ").load().unwrap();
        assert_eq!(settings.github.token, None);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SettingsLoader::isolated()
            .file(&dir.path().join("nope.toml"))
            .load();
        assert!(matches!(result, Err(SettingsError::Load(_))));
    }

    #[test]
    fn test_standard_loader_includes_explicit_file_last() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.toml");
        let loader = SettingsLoader::standard(Some(&path));
        assert_eq!(loader.files.last(), Some(&(path, true)));
    }

    #[test]
    fn test_parse_url_names_the_key() {
        let err = parse_url("contact.endpoint", "not a url").unwrap_err();
        assert!(err.to_string().contains("contact.endpoint"));
    }
}
