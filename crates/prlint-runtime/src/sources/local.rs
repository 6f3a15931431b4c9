//! Filesystem and in-memory sources, for local runs and tests.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{CommitMessageSource, ConfigSource, RepoRef, SourceError};

/// Reads the configuration file from a local checkout.
///
/// The repository and ref are ignored; `path` is resolved against `root`.
#[derive(Debug, Clone)]
pub struct LocalConfigSource {
    root: PathBuf,
}

impl LocalConfigSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ConfigSource for LocalConfigSource {
    async fn fetch_config(
        &self,
        _repo: &RepoRef,
        path: &str,
        _git_ref: &str,
    ) -> Result<Option<String>, SourceError> {
        let full_path = self.root.join(path);
        match tokio::fs::read_to_string(&full_path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SourceError::Io(e)),
        }
    }

    fn name(&self) -> &str {
        "local"
    }
}

/// Serves a fixed configuration document.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigSource {
    contents: Option<String>,
}

impl StaticConfigSource {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }

    /// A source where the file does not exist.
    pub fn missing() -> Self {
        Self { contents: None }
    }
}

#[async_trait]
impl ConfigSource for StaticConfigSource {
    async fn fetch_config(
        &self,
        _repo: &RepoRef,
        _path: &str,
        _git_ref: &str,
    ) -> Result<Option<String>, SourceError> {
        Ok(self.contents.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Serves a fixed list of commit messages, or a fixed failure.
#[derive(Debug)]
pub struct StaticCommitSource {
    messages: Result<Vec<String>, String>,
    calls: AtomicUsize,
}

impl StaticCommitSource {
    pub fn new<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            messages: Ok(messages.into_iter().map(Into::into).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A source whose every call fails with an HTTP error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            messages: Err(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `list_commits` was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for StaticCommitSource {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

#[async_trait]
impl CommitMessageSource for StaticCommitSource {
    async fn list_commits(
        &self,
        _repo: &RepoRef,
        _pull_number: u64,
    ) -> Result<Vec<String>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.messages.clone().map_err(SourceError::HttpError)
    }

    fn name(&self) -> &str {
        "static"
    }
}
