//! # prlint-runtime
//!
//! Host collaborators for `prlint-core`.
//!
//! The core engine is synchronous and performs no I/O. This crate supplies
//! everything around it:
//! - parsing the pull-request event payload
//! - loading `pr-lint.yml` from the repository (defaults on any failure)
//! - listing the pull request's commits, only when the commits check is on
//! - retrying transient API failures
//! - reporting the verdict to the host
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use prlint_runtime::{LintRunner, PullRequestEvent, RunOptions};
//! use prlint_runtime::sources::{GitHubClient, GitHubToken};
//!
//! let client = Arc::new(GitHubClient::new(GitHubToken::from_env()?)?);
//! let runner = LintRunner::new(client.clone(), client);
//!
//! let event = PullRequestEvent::from_file(std::env::var("GITHUB_EVENT_PATH")?)?;
//! let report = runner.run(&event, &RunOptions::default()).await?;
//! ```

pub mod event;
pub mod loader;
pub mod orchestrator;
pub mod report;
pub mod resilience;
pub mod sources;

pub use event::{EventError, PullRequestEvent, SUPPORTED_ACTIONS};
pub use loader::load_configuration;
pub use orchestrator::{CommitFetchPolicy, LintRunner, RunOptions, RunReport, RuntimeError};
pub use report::{report_run, ActionsSink, VerdictSink};
pub use resilience::RetryConfig;
pub use sources::{CommitMessageSource, ConfigSource, RepoRef, SourceError};
