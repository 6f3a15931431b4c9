//! Run orchestration.
//!
//! One run handles one pull-request event:
//! 1. Skip actions that should not be linted
//! 2. Load the configuration (defaults on any failure)
//! 3. Fetch commit messages, only when the commits check is enabled
//! 4. Evaluate with `prlint-core` and return the result
//!
//! The commit fetch is the only call that can fail the run. What happens then
//! is decided by [`CommitFetchPolicy`].

use std::sync::Arc;
use thiserror::Error;

use prlint_core::{
    conclude, evaluate, CheckEvaluator, CheckKind, CheckOutcome, EvaluationError,
    EvaluationResult, DEFAULT_CONFIG_PATH,
};

use crate::event::PullRequestEvent;
use crate::loader::load_configuration;
use crate::resilience::{with_retry, RetryConfig};
use crate::sources::{CommitMessageSource, ConfigSource, SourceError};

/// Errors from a run.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Failed to list commits: {0}")]
    CommitFetch(#[source] SourceError),

    #[error("Evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),
}

/// What to do when the commit list cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitFetchPolicy {
    /// Return the error to the host
    #[default]
    Propagate,

    /// Record the commits check as failed and keep going
    FailCheck,
}

/// Per-run options supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Configuration file path inside the repository
    pub config_path: String,

    /// Replaces the default failure message when set
    pub custom_error_message: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config_path: DEFAULT_CONFIG_PATH.to_string(),
            custom_error_message: None,
        }
    }
}

/// Outcome of a run.
#[derive(Debug, Clone)]
pub enum RunReport {
    /// The event action is not one that gets linted
    Skipped { action: String },

    /// The checks ran
    Evaluated(EvaluationResult),
}

impl RunReport {
    /// Skipped runs count as passing.
    pub fn passed(&self) -> bool {
        match self {
            RunReport::Skipped { .. } => true,
            RunReport::Evaluated(result) => result.verdict.passed,
        }
    }
}

/// Drives a run against the host collaborators.
pub struct LintRunner {
    configs: Arc<dyn ConfigSource>,
    commits: Arc<dyn CommitMessageSource>,
    retry: RetryConfig,
    commit_fetch_policy: CommitFetchPolicy,
}

impl LintRunner {
    pub fn new(configs: Arc<dyn ConfigSource>, commits: Arc<dyn CommitMessageSource>) -> Self {
        Self {
            configs,
            commits,
            retry: RetryConfig::default(),
            commit_fetch_policy: CommitFetchPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_commit_fetch_policy(mut self, policy: CommitFetchPolicy) -> Self {
        self.commit_fetch_policy = policy;
        self
    }

    /// Lint one pull-request event.
    pub async fn run(
        &self,
        event: &PullRequestEvent,
        options: &RunOptions,
    ) -> Result<RunReport, RuntimeError> {
        if !event.is_supported_action() {
            let action = event.action.clone().unwrap_or_default();
            tracing::info!(action = %action, "Event action is not linted, skipping");
            return Ok(RunReport::Skipped { action });
        }

        let repo = event.repo();
        let config = load_configuration(
            self.configs.as_ref(),
            &repo,
            &options.config_path,
            event.head_ref(),
            &self.retry,
        )
        .await;
        tracing::debug!(?config, "Resolved configuration");

        let custom_message = options.custom_error_message.as_deref();
        let mut context = event.to_context();

        if !config.is_enabled(CheckKind::Commits) {
            return Ok(RunReport::Evaluated(evaluate(
                &config,
                &context,
                custom_message,
            )?));
        }

        let pull_number = event.pull_number();
        let fetched = with_retry(&self.retry, "list commits", || {
            self.commits.list_commits(&repo, pull_number)
        })
        .await;

        let result = match fetched {
            Ok(messages) => {
                tracing::debug!(
                    source = self.commits.name(),
                    count = messages.len(),
                    "Fetched commit messages"
                );
                context.commit_messages = messages;
                evaluate(&config, &context, custom_message)?
            }
            Err(e) => match self.commit_fetch_policy {
                CommitFetchPolicy::Propagate => return Err(RuntimeError::CommitFetch(e)),
                CommitFetchPolicy::FailCheck => {
                    let diagnostic = format!("Could not list commits: {}", e);
                    tracing::info!(check = %CheckKind::Commits, "{}", diagnostic);

                    let mut outcomes = CheckEvaluator::new().evaluate(&config, &context)?;
                    outcomes.set(CheckOutcome::failed(CheckKind::Commits, vec![diagnostic]));
                    conclude(&config, outcomes, custom_message)
                }
            },
        };

        Ok(RunReport::Evaluated(result))
    }
}
