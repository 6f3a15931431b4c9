//! GitHub REST API client.
//!
//! Implements both collaborator traits:
//! - [`CommitMessageSource`] via `GET /repos/{owner}/{repo}/pulls/{n}/commits`
//! - [`ConfigSource`] via `GET /repos/{owner}/{repo}/contents/{path}?ref=...`
//!
//! ## Security
//!
//! The token lives in a [`GitHubToken`] and is only exposed when the
//! `Authorization` header is set.

use async_trait::async_trait;
use reqwest::{IntoUrl, Response, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

use super::{CommitMessageSource, ConfigSource, GitHubToken, RepoRef, SourceError};

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Largest page size the commits endpoint accepts.
const PER_PAGE: usize = 100;

const API_VERSION: &str = "2022-11-28";

/// GitHub REST client.
pub struct GitHubClient {
    token: GitHubToken,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("token", &self.token)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GitHubClient {
    /// Create a client for the public API with a 30 second request timeout.
    pub fn new(token: GitHubToken) -> Result<Self, SourceError> {
        Self::with_options(token, DEFAULT_API_URL, Duration::from_secs(30))
    }

    /// Create a client for a custom endpoint (GitHub Enterprise, tests).
    pub fn with_options(
        token: GitHubToken,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pr-lint/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::HttpError(e.to_string()))?;

        Ok(Self {
            token,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, url: impl IntoUrl) -> reqwest::RequestBuilder {
        // Only expose the token here, at the point of use
        self.client
            .get(url)
            .bearer_auth(self.token.expose())
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    /// Contents endpoint for `path`, with every path segment percent-encoded.
    fn contents_url(&self, repo: &RepoRef, path: &str) -> Result<Url, SourceError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SourceError::HttpError(format!("Invalid API URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| SourceError::HttpError(format!("Invalid API URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(["repos", repo.owner.as_str(), repo.name.as_str(), "contents"])
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, SourceError> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(self.timeout)
            } else {
                SourceError::HttpError(e.to_string())
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct PullRequestCommit {
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    message: String,
}

/// Map a non-success response to a [`SourceError`].
async fn error_for(response: Response) -> SourceError {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        return SourceError::AuthError;
    }

    let rate_limited = status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN
            && response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                == Some("0"));
    if rate_limited {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs);
        return SourceError::RateLimited { retry_after };
    }

    let message = match response.json::<GitHubErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    SourceError::ApiError {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl CommitMessageSource for GitHubClient {
    async fn list_commits(
        &self,
        repo: &RepoRef,
        pull_number: u64,
    ) -> Result<Vec<String>, SourceError> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/commits",
            self.base_url, repo.owner, repo.name, pull_number
        );

        let mut messages = Vec::new();
        let mut page = 1usize;
        loop {
            let request = self
                .get(url.as_str())
                .header("Accept", "application/vnd.github+json")
                .query(&[("per_page", PER_PAGE), ("page", page)]);
            let response = self.send(request).await?;

            if !response.status().is_success() {
                return Err(error_for(response).await);
            }

            let commits: Vec<PullRequestCommit> = response
                .json()
                .await
                .map_err(|e| SourceError::ParseError(e.to_string()))?;
            let count = commits.len();
            messages.extend(commits.into_iter().map(|c| c.commit.message));

            tracing::debug!(repo = %repo, pull_number, page, count, "Fetched commit page");

            if count < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(messages)
    }

    fn name(&self) -> &str {
        "github"
    }
}

#[async_trait]
impl ConfigSource for GitHubClient {
    async fn fetch_config(
        &self,
        repo: &RepoRef,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<String>, SourceError> {
        let url = self.contents_url(repo, path)?;
        let request = self
            .get(url)
            .header("Accept", "application/vnd.github.raw+json")
            .query(&[("ref", git_ref)]);
        let response = self.send(request).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_for(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::ParseError(e.to_string()))?;
        Ok(Some(body))
    }

    fn name(&self) -> &str {
        "github"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::CredentialSource;

    #[test]
    fn test_debug_hides_token() {
        let client = GitHubClient::new(GitHubToken::new(
            "ghp_secret",
            CredentialSource::Programmatic,
        ))
        .unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("api.github.com"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GitHubClient::with_options(
            GitHubToken::new("t", CredentialSource::Programmatic),
            "https://ghe.example.com/api/v3/",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url(), "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_contents_url_encodes_path_segments() {
        let client = GitHubClient::with_options(
            GitHubToken::new("t", CredentialSource::Programmatic),
            "https://ghe.example.com/api/v3/",
            Duration::from_secs(5),
        )
        .unwrap();
        let repo = RepoRef::new("octo", "widgets");

        let url = client.contents_url(&repo, "/.github/lint #1?.yml").unwrap();
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/octo/widgets/contents/.github/lint%20%231%3F.yml"
        );
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }
}
