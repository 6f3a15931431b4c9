//! Commits check: every commit message must carry a project prefix.

use crate::commits::find_failed_commits;
use crate::config::Configuration;
use crate::types::{CheckKind, CheckOutcome, PullRequestContext};
use crate::EvaluationError;

use super::{fail_with, Check};

/// Passes iff no commit message lacks a project reference.
pub struct CommitsCheck;

impl Check for CommitsCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Commits
    }

    fn run(
        &self,
        config: &Configuration,
        context: &PullRequestContext,
    ) -> Result<CheckOutcome, EvaluationError> {
        let failed = find_failed_commits(
            &config.match_keys(),
            &context.commit_messages,
            config.ignore_case,
        )?;

        if failed.is_empty() {
            return Ok(CheckOutcome::passed(self.kind()));
        }

        let diagnostics = failed
            .iter()
            .map(|message| {
                format!(
                    "Commit message '{}' does not contain an approved project",
                    message
                )
            })
            .collect();
        Ok(fail_with(self.kind(), diagnostics))
    }
}
