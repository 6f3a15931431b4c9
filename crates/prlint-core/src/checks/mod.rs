//! The four pull-request checks.
//!
//! Each check is a pure function of the resolved [`Configuration`] and the
//! [`PullRequestContext`]. A disabled check never matches anything and reports
//! a vacuous pass. Checks are evaluated independently: a failure in one never
//! short-circuits the others.

mod branch;
mod commits;
mod description;
mod title;

pub use branch::BranchCheck;
pub use commits::CommitsCheck;
pub use description::DescriptionCheck;
pub use title::TitleCheck;

use crate::config::Configuration;
use crate::patterns::{any_match, fold_case, PatternBuilder};
use crate::types::{CheckKind, CheckOutcome, CheckOutcomes, PullRequestContext};
use crate::EvaluationError;

/// Expected token shape for bracketed free text.
pub(crate) const BRACKETED_FORMAT: &str = "[PROJECT-1234]";

/// Expected token shape for branch names and commit messages.
pub(crate) const LOOSE_FORMAT: &str = "PROJECT-1234 or PROJECT_1234";

/// A single check over pull-request text.
pub trait Check {
    fn kind(&self) -> CheckKind;

    /// Run the check. Only called when the check is enabled.
    fn run(
        &self,
        config: &Configuration,
        context: &PullRequestContext,
    ) -> Result<CheckOutcome, EvaluationError>;

    /// Run the check if enabled, otherwise report a vacuous pass.
    fn evaluate(
        &self,
        config: &Configuration,
        context: &PullRequestContext,
    ) -> Result<CheckOutcome, EvaluationError> {
        if !config.is_enabled(self.kind()) {
            return Ok(CheckOutcome::vacuous(self.kind()));
        }
        self.run(config, context)
    }
}

/// Evaluate one check kind.
pub fn evaluate_check(
    kind: CheckKind,
    config: &Configuration,
    context: &PullRequestContext,
) -> Result<CheckOutcome, EvaluationError> {
    match kind {
        CheckKind::Title => TitleCheck.evaluate(config, context),
        CheckKind::Branch => BranchCheck.evaluate(config, context),
        CheckKind::Description => DescriptionCheck.evaluate(config, context),
        CheckKind::Commits => CommitsCheck.evaluate(config, context),
    }
}

/// Runs all four checks.
pub struct CheckEvaluator;

impl CheckEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate every check kind, in canonical order.
    pub fn evaluate(
        &self,
        config: &Configuration,
        context: &PullRequestContext,
    ) -> Result<CheckOutcomes, EvaluationError> {
        let mut outcomes = CheckOutcomes::all_vacuous();
        for kind in CheckKind::ALL {
            outcomes.set(evaluate_check(kind, config, context)?);
        }
        Ok(outcomes)
    }
}

impl Default for CheckEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared body of the title and description checks: strict pattern per project.
pub(crate) fn strict_text_check(
    kind: CheckKind,
    config: &Configuration,
    text: &str,
    diagnostic: impl FnOnce(&str) -> String,
) -> Result<CheckOutcome, EvaluationError> {
    let patterns = PatternBuilder::from_config(config).strict_patterns()?;
    let subject = fold_case(text, config.ignore_case);

    if any_match(&patterns, &subject) {
        return Ok(CheckOutcome::passed(kind));
    }

    let expected = if config.require_brackets {
        BRACKETED_FORMAT
    } else {
        LOOSE_FORMAT
    };
    Ok(fail_with(kind, vec![diagnostic(expected)]))
}

/// Build a failed outcome, logging each diagnostic line.
pub(crate) fn fail_with(kind: CheckKind, diagnostics: Vec<String>) -> CheckOutcome {
    for line in &diagnostics {
        tracing::info!(check = %kind, "{}", line);
    }
    CheckOutcome::failed(kind, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    struct BufferWriter(Arc<Mutex<Vec<u8>>>);

    impl<'a> MakeWriter<'a> for SharedBuffer {
        type Writer = BufferWriter;

        fn make_writer(&'a self) -> Self::Writer {
            BufferWriter(Arc::clone(&self.0))
        }
    }

    impl io::Write for BufferWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` and return the log lines it emitted, without timestamps or levels.
    fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
        let sink = SharedBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(sink.clone())
            .with_ansi(false)
            .without_time()
            .with_level(false)
            .with_target(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        let value = tracing::subscriber::with_default(subscriber, f);
        let text = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        (value, text.lines().map(str::to_string).collect())
    }

    #[test]
    fn test_disabled_checks_are_vacuous() {
        let config = Configuration {
            check_title: false,
            ..Configuration::default()
        };
        let context = PullRequestContext::new("no reference", "main");

        let outcomes = CheckEvaluator::new().evaluate(&config, &context).unwrap();
        for outcome in outcomes.iter() {
            assert!(!outcome.enabled);
            assert!(outcome.passed);
            assert!(outcome.diagnostics.is_empty());
        }
    }

    #[test]
    fn test_all_enabled_checks_run_without_short_circuit() {
        let config = Configuration {
            check_branch: true,
            check_description: true,
            check_commits: true,
            ..Configuration::default()
        };
        let context = PullRequestContext::new("no ref", "main")
            .with_description("nothing")
            .with_commit_messages(["first", "second"]);

        let outcomes = CheckEvaluator::new().evaluate(&config, &context).unwrap();
        assert_eq!(outcomes.enabled().count(), 4);
        assert!(outcomes.iter().all(|o| !o.passed));
        assert_eq!(outcomes.commits.diagnostics.len(), 2);
    }

    #[test]
    fn test_evaluate_check_dispatch() {
        let config = Configuration {
            check_branch: true,
            ..Configuration::default()
        };
        let context = PullRequestContext::new("[PROJ-1] title", "PROJ-1-branch");

        let branch = evaluate_check(CheckKind::Branch, &config, &context).unwrap();
        assert_eq!(branch.kind, CheckKind::Branch);
        assert!(branch.enabled && branch.passed);

        let commits = evaluate_check(CheckKind::Commits, &config, &context).unwrap();
        assert!(!commits.enabled);
    }

    #[test]
    fn test_each_failure_is_logged_with_its_check() {
        let config = Configuration {
            check_branch: true,
            check_description: true,
            ..Configuration::default()
        };
        let context = PullRequestContext::new("no ref", "main").with_description("[PROJ-9]");

        let (outcomes, lines) =
            capture_logs(|| CheckEvaluator::new().evaluate(&config, &context).unwrap());

        assert!(!outcomes.title.passed);
        assert!(!outcomes.branch.passed);
        assert!(outcomes.description.passed);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().any(|l| l.contains("check=title")
            && l.contains("PR title no ref does not contain approved project")));
        assert!(lines.iter().any(|l| l.contains("check=branch")
            && l.contains("PR branch main does not contain an approved project")));
    }
}
