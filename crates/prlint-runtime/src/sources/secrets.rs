//! Secure handling of the GitHub API token.
//!
//! - **No accidental logging**: the token never appears in Debug/Display output
//! - **Memory safety**: the token is zeroed on drop
//! - **Explicit use**: the value is only reachable through [`GitHubToken::expose`]
//!
//! ## Usage
//!
//! ```ignore
//! use prlint_runtime::sources::GitHubToken;
//!
//! let token = GitHubToken::from_env()?;
//! request.bearer_auth(token.expose());
//! ```

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use super::SourceError;

/// Environment variable the host sets with the workflow token.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Where the token was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from an environment variable
    Environment,
    /// Provided programmatically (CLI flag, tests)
    Programmatic,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Environment => write!(f, "environment"),
            CredentialSource::Programmatic => write!(f, "programmatic"),
        }
    }
}

/// A securely stored GitHub token.
pub struct GitHubToken {
    value: SecretString,
    source: CredentialSource,
}

impl GitHubToken {
    /// Wrap a token value. It cannot be printed after this point.
    pub fn new(value: impl Into<String>, source: CredentialSource) -> Self {
        Self {
            value: SecretString::from(value.into()),
            source,
        }
    }

    /// Load the token from `GITHUB_TOKEN`.
    pub fn from_env() -> Result<Self, SourceError> {
        Self::from_env_var(GITHUB_TOKEN_ENV)
    }

    /// Load the token from a named environment variable. Empty values count as unset.
    pub fn from_env_var(env_var: &str) -> Result<Self, SourceError> {
        match std::env::var(env_var) {
            Ok(value) if !value.is_empty() => Ok(Self::new(value, CredentialSource::Environment)),
            _ => Err(SourceError::NotConfigured(format!(
                "GitHub token not set: configure '{}' environment variable",
                env_var
            ))),
        }
    }

    /// Use an explicitly provided value, falling back to `GITHUB_TOKEN`.
    pub fn from_value_or_env(value: Option<String>) -> Result<Self, SourceError> {
        match value {
            Some(value) if !value.is_empty() => Ok(Self::new(value, CredentialSource::Programmatic)),
            _ => Self::from_env(),
        }
    }

    /// Expose the token for an HTTP header. Never store the returned value.
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }
}

impl fmt::Debug for GitHubToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubToken")
            .field("value", &"[REDACTED]")
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for GitHubToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED GitHub token from {}]", self.source)
    }
}
