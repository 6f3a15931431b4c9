//! Host collaborators the runner pulls data from.
//!
//! This module defines the traits for retrieving configuration files and
//! commit messages, and includes implementations for the GitHub REST API,
//! the local filesystem and in-memory fixtures.
//!
//! ## Security
//!
//! The GitHub client keeps its token in a [`GitHubToken`], which never shows
//! up in `Debug` output or logs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

mod local;
pub mod secrets;

#[cfg(feature = "github")]
mod github;

pub use local::{LocalConfigSource, StaticCommitSource, StaticConfigSource};
pub use secrets::{CredentialSource, GitHubToken, GITHUB_TOKEN_ENV};

#[cfg(feature = "github")]
pub use github::{GitHubClient, DEFAULT_API_URL};

/// Errors from host collaborators.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("Rate limit exceeded, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    ParseError(String),

    #[error("Authentication failed")]
    AuthError,

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    /// Whether retrying the same call might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::HttpError(_) | SourceError::RateLimited { .. } | SourceError::Timeout(_) => {
                true
            }
            SourceError::ApiError { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Owner and name of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Lists the commit messages of a pull request.
///
/// Only called when the commits check is enabled.
#[async_trait]
pub trait CommitMessageSource: Send + Sync {
    async fn list_commits(
        &self,
        repo: &RepoRef,
        pull_number: u64,
    ) -> Result<Vec<String>, SourceError>;

    /// Source name for logs.
    fn name(&self) -> &str;
}

/// Fetches the raw text of a configuration file at a ref.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// `Ok(None)` when the file does not exist.
    async fn fetch_config(
        &self,
        repo: &RepoRef,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<String>, SourceError>;

    /// Source name for logs.
    fn name(&self) -> &str;
}
