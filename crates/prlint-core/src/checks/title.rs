//! Title check: the PR title must carry a project token.

use crate::config::Configuration;
use crate::types::{CheckKind, CheckOutcome, PullRequestContext};
use crate::EvaluationError;

use super::{strict_text_check, Check};

/// Looks for `[KEY-123]` (or the loose form without brackets) in the title.
pub struct TitleCheck;

impl Check for TitleCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Title
    }

    fn run(
        &self,
        config: &Configuration,
        context: &PullRequestContext,
    ) -> Result<CheckOutcome, EvaluationError> {
        strict_text_check(self.kind(), config, &context.title, |expected| {
            format!(
                "PR title {} does not contain approved project with format {}",
                context.title, expected
            )
        })
    }
}
