use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::domain::ReleaseTag;
use crate::error::{ReleaseError, Result};
use crate::version::DEFAULT_SEED;

const CONFIG_FILE_NAME: &str = "scorecard-release.toml";

/// Complete runtime configuration, built once at startup and handed to
/// every pipeline stage.
///
/// The token is never read from the config file; it only comes from
/// `GITHUB_TOKEN` / `GH_TOKEN`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_seed_version")]
    pub seed_version: String,

    #[serde(default = "default_notes_file")]
    pub notes_file: PathBuf,

    #[serde(default = "default_max_upstream_lines")]
    pub max_upstream_lines: usize,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// This repository in `owner/repo` form; derived from the remote when unset
    #[serde(default)]
    pub repository: Option<String>,

    #[serde(default)]
    pub tagger: TaggerConfig,

    #[serde(skip)]
    pub token: Option<SecretString>,

    /// `$GITHUB_OUTPUT` file that receives step outputs
    #[serde(skip)]
    pub github_output: Option<PathBuf>,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_seed_version() -> String {
    DEFAULT_SEED.to_string()
}

fn default_notes_file() -> PathBuf {
    PathBuf::from("release-notes.md")
}

fn default_max_upstream_lines() -> usize {
    50
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

/// Identity recorded on annotated release tags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TaggerConfig {
    #[serde(default = "default_tagger_name")]
    pub name: String,

    #[serde(default = "default_tagger_email")]
    pub email: String,
}

fn default_tagger_name() -> String {
    "github-actions[bot]".to_string()
}

fn default_tagger_email() -> String {
    "github-actions[bot]@users.noreply.github.com".to_string()
}

impl Default for TaggerConfig {
    fn default() -> Self {
        TaggerConfig {
            name: default_tagger_name(),
            email: default_tagger_email(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            seed_version: default_seed_version(),
            notes_file: default_notes_file(),
            max_upstream_lines: default_max_upstream_lines(),
            api_url: default_api_url(),
            repository: None,
            tagger: TaggerConfig::default(),
            token: None,
            github_output: None,
        }
    }
}

impl Config {
    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay values from an arbitrary variable lookup.
    ///
    /// `GITHUB_TOKEN` wins over `GH_TOKEN`; empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(token) = get("GITHUB_TOKEN").or_else(|| get("GH_TOKEN")) {
            self.token = Some(SecretString::from(token));
        }
        if let Some(repository) = get("GITHUB_REPOSITORY") {
            self.repository = Some(repository);
        }
        if let Some(api_url) = get("GITHUB_API_URL") {
            self.api_url = api_url;
        }
        if let Some(output) = get("GITHUB_OUTPUT") {
            self.github_output = Some(PathBuf::from(output));
        }
    }

    /// The version used when no release tag exists.
    pub fn seed(&self) -> Result<ReleaseTag> {
        ReleaseTag::parse(&self.seed_version).map_err(|e| {
            ReleaseError::config(format!("seed_version '{}': {}", self.seed_version, e))
        })
    }

    /// The API token, or a fatal precondition error when absent.
    pub fn require_token(&self) -> Result<&SecretString> {
        self.token.as_ref().ok_or(ReleaseError::MissingToken)
    }

    /// Validate values that would otherwise fail deep inside a stage.
    pub fn validate(&self) -> Result<()> {
        self.seed()?;

        if self.max_upstream_lines == 0 {
            return Err(ReleaseError::config("max_upstream_lines must be at least 1"));
        }
        if let Some(repository) = &self.repository {
            if !is_owner_repo(repository) {
                return Err(ReleaseError::config(format!(
                    "repository '{}' is not in owner/repo form",
                    repository
                )));
            }
        }
        Ok(())
    }
}

fn is_owner_repo(value: &str) -> bool {
    let mut parts = value.split('/');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty()
    )
}

fn remote_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"github\.com[:/](?P<owner>[^/\s]+)/(?P<repo>[^/\s]+?)(?:\.git)?/?$")
            .expect("valid remote url regex")
    })
}

/// Derive `owner/repo` from a GitHub remote URL (HTTPS or SSH form).
///
/// # Example
/// ```ignore
/// assert_eq!(
///     repository_from_remote_url("git@github.com:broadsage/scorecard-action.git"),
///     Some("broadsage/scorecard-action".to_string())
/// );
/// ```
pub fn repository_from_remote_url(url: &str) -> Option<String> {
    remote_url_regex()
        .captures(url.trim())
        .map(|caps| format!("{}/{}", &caps["owner"], &caps["repo"]))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `scorecard-release.toml` in current directory
/// 3. `scorecard-release.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// Environment overrides are applied separately with [`Config::apply_env`].
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| {
            ReleaseError::config(format!("cannot read {}: {}", path.display(), e))
        })?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    log::debug!("loaded configuration: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.remote, "origin");
        assert_eq!(config.seed().unwrap().name(), "v1.0.1");
        assert_eq!(config.max_upstream_lines, 50);
        assert_eq!(config.tagger.name, "github-actions[bot]");
        assert!(config.token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_github_token_preferred_over_gh_token() {
        let mut config = Config::default();
        config.apply_env_from(lookup(&[("GITHUB_TOKEN", "primary"), ("GH_TOKEN", "secondary")]));
        assert_eq!(config.require_token().unwrap().expose_secret(), "primary");
    }

    #[test]
    fn test_gh_token_fallback_and_empty_ignored() {
        let mut config = Config::default();
        config.apply_env_from(lookup(&[("GITHUB_TOKEN", "  "), ("GH_TOKEN", "secondary")]));
        assert_eq!(config.require_token().unwrap().expose_secret(), "secondary");
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let config = Config::default();
        assert!(matches!(
            config.require_token(),
            Err(ReleaseError::MissingToken)
        ));
    }

    #[test]
    fn test_env_overrides_repository_and_output() {
        let mut config = Config::default();
        config.apply_env_from(lookup(&[
            ("GITHUB_REPOSITORY", "broadsage/scorecard-action"),
            ("GITHUB_API_URL", "https://ghe.example.com/api/v3"),
            ("GITHUB_OUTPUT", "/tmp/out"),
        ]));
        assert_eq!(
            config.repository.as_deref(),
            Some("broadsage/scorecard-action")
        );
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.github_output, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config {
            seed_version: "1.0".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            repository: Some("no-slash".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            max_upstream_lines: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_repository_from_remote_url() {
        assert_eq!(
            repository_from_remote_url("https://github.com/broadsage/scorecard-action.git"),
            Some("broadsage/scorecard-action".to_string())
        );
        assert_eq!(
            repository_from_remote_url("git@github.com:broadsage/scorecard-action.git"),
            Some("broadsage/scorecard-action".to_string())
        );
        assert_eq!(
            repository_from_remote_url("https://github.com/broadsage/scorecard-action"),
            Some("broadsage/scorecard-action".to_string())
        );
        assert_eq!(repository_from_remote_url("/srv/git/local.git"), None);
    }
}
