use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{ReleaseError, Result};

use super::types::{CreatedRelease, ReleaseRequest, ReleaseResponse};
use super::{ReleasePublisher, UpstreamReleases};

const API_VERSION: &str = "2022-11-28";

/// Blocking GitHub REST client.
///
/// Requests go out with the underlying client's default timeouts and are
/// never retried.
pub struct GitHubClient {
    client: Client,
    api_url: String,
}

impl GitHubClient {
    /// Build a client for `api_url`, authenticated when `token` is given.
    pub fn new(api_url: &str, token: Option<&SecretString>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("scorecard-release/", env!("CARGO_PKG_VERSION"))),
        );

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|_| ReleaseError::config("GitHub token contains invalid characters"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder().default_headers(headers).build()?;

        Ok(GitHubClient {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn repo_url(&self, repository: &str, path: &str) -> String {
        format!("{}/repos/{}/{}", self.api_url, repository, path)
    }
}

impl UpstreamReleases for GitHubClient {
    fn release_body(&self, repository: &str, tag: &str) -> Result<Option<String>> {
        let url = self.repo_url(repository, &format!("releases/tags/{}", tag));
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send()?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ReleaseError::api(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        let release: ReleaseResponse = response.json()?;
        Ok(release.body.filter(|body| !body.trim().is_empty()))
    }
}

impl ReleasePublisher for GitHubClient {
    fn create_release(&self, repository: &str, request: &ReleaseRequest) -> Result<CreatedRelease> {
        let url = self.repo_url(repository, "releases");
        log::debug!("POST {} ({})", url, request.tag_name);

        let response = self.client.post(&url).json(request).send()?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(ReleaseError::api(format!(
                "POST {} returned {}: {}",
                url, status, detail
            )));
        }

        Ok(response.json()?)
    }
}
