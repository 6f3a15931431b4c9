//! Branch check: the head branch name must carry a project prefix.

use crate::config::Configuration;
use crate::patterns::{any_match, fold_case, PatternBuilder};
use crate::types::{CheckKind, CheckOutcome, PullRequestContext};
use crate::EvaluationError;

use super::{fail_with, Check, LOOSE_FORMAT};

/// Looks for `KEY-123` or `KEY_123` anywhere in the branch ref.
pub struct BranchCheck;

impl Check for BranchCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Branch
    }

    fn run(
        &self,
        config: &Configuration,
        context: &PullRequestContext,
    ) -> Result<CheckOutcome, EvaluationError> {
        let patterns = PatternBuilder::from_config(config).loose_patterns()?;
        let branch = fold_case(&context.branch_ref, config.ignore_case);

        if any_match(&patterns, &branch) {
            return Ok(CheckOutcome::passed(self.kind()));
        }

        Ok(fail_with(
            self.kind(),
            vec![format!(
                "PR branch {} does not contain an approved project with format {}",
                context.branch_ref, LOOSE_FORMAT
            )],
        ))
    }
}
