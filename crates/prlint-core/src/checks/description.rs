//! Description check: the PR body must carry a project token.

use crate::config::Configuration;
use crate::types::{CheckKind, CheckOutcome, PullRequestContext};
use crate::EvaluationError;

use super::{strict_text_check, Check};

/// Same rule as the title check, applied to the body. An absent body is empty.
pub struct DescriptionCheck;

impl Check for DescriptionCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Description
    }

    fn run(
        &self,
        config: &Configuration,
        context: &PullRequestContext,
    ) -> Result<CheckOutcome, EvaluationError> {
        strict_text_check(self.kind(), config, context.description_text(), |expected| {
            format!(
                "PR description does not contain approved project with format {}",
                expected
            )
        })
    }
}
