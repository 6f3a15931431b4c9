//! # prlint-core
//!
//! Deterministic pull-request lint engine.
//!
//! Given a resolved [`Configuration`] and the text of a pull request, this
//! crate decides whether the PR references an approved project key such as
//! `PROJ-123`:
//! - **title** and **description** look for the bracketed form `[PROJ-123]`
//! - **branch** and **commits** look for the prefix form `PROJ-123` / `PROJ_123`
//!
//! Outcomes are combined under `and`/`or` logic into a single [`Verdict`].
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same input always produces same output
//! 2. **No I/O**: Fetching payloads, configs and commits is the caller's job
//! 3. **Independent checks**: Every enabled check runs, regardless of the others
//!
//! ## Example
//!
//! ```rust
//! use prlint_core::{evaluate, Configuration, PullRequestContext};
//!
//! let config = Configuration::default();
//! let context = PullRequestContext::new("Fix login bug [PROJ-42]", "feature/login");
//! let result = evaluate(&config, &context, None)?;
//!
//! assert!(result.verdict.passed);
//! # Ok::<(), prlint_core::EvaluationError>(())
//! ```

pub mod checks;
pub mod commits;
pub mod config;
pub mod patterns;
pub mod types;
pub mod verdict;

// Re-export main types at crate root
pub use checks::{evaluate_check, Check, CheckEvaluator};
pub use commits::find_failed_commits;
pub use config::{
    CheckLogic, ConfigError, ConfigOverride, Configuration, DEFAULT_CONFIG_PATH, DEFAULT_PROJECT,
};
pub use patterns::{build_loose_pattern, build_strict_pattern, PatternBuilder, ProjectPattern};
pub use types::{
    CheckKind, CheckOutcome, CheckOutcomes, EvaluationResult, PullRequestContext, Verdict,
};
pub use verdict::{VerdictCombiner, AND_FAILURE_MESSAGE, OR_FAILURE_MESSAGE};

use chrono::Utc;
use thiserror::Error;

/// Errors that can occur during evaluation
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("Invalid project pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Evaluate a pull request against a configuration.
///
/// This is the main entry point: all four checks run, then their outcomes are
/// combined under `config.check_logic`. `custom_message`, when non-empty,
/// replaces the default failure message.
pub fn evaluate(
    config: &Configuration,
    context: &PullRequestContext,
    custom_message: Option<&str>,
) -> Result<EvaluationResult, EvaluationError> {
    let outcomes = CheckEvaluator::new().evaluate(config, context)?;
    Ok(conclude(config, outcomes, custom_message))
}

/// Combine already computed outcomes into an [`EvaluationResult`].
///
/// Useful when a host replaces an outcome, for example recording the commits
/// check as failed because the commit list could not be fetched.
pub fn conclude(
    config: &Configuration,
    outcomes: CheckOutcomes,
    custom_message: Option<&str>,
) -> EvaluationResult {
    let verdict = VerdictCombiner::new()
        .with_custom_message(custom_message)
        .combine(&outcomes, config.check_logic);

    tracing::debug!(
        passed = verdict.passed,
        logic = %config.check_logic,
        enabled = outcomes.enabled().count(),
        "Evaluation complete"
    );

    EvaluationResult {
        verdict,
        outcomes,
        logic: config.check_logic,
        evaluated_at: Utc::now(),
    }
}
