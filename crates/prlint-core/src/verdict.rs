//! Verdict combiner: folds check outcomes into one pass/fail answer.
//!
//! Two modes:
//! 1. **and** (default): pass iff no enabled check failed. Disabled checks are
//!    vacuous passes, so enabling nothing passes.
//! 2. **or**: pass iff at least one enabled check passed. Enabling nothing
//!    FAILS: "or" needs something to actually succeed.
//!
//! The asymmetry between the two modes with zero enabled checks is deliberate
//! and surprising; do not "fix" it.
//!
//! Exactly one message is produced on failure. A caller-supplied custom
//! message always wins over the generated default.

use crate::config::CheckLogic;
use crate::types::{CheckOutcomes, Verdict};

/// Default failure message in and-mode.
pub const AND_FAILURE_MESSAGE: &str = "PR Linting Failed";

/// Default failure message in or-mode.
pub const OR_FAILURE_MESSAGE: &str = "PR Linting Failed - no checks passed";

/// Combines check outcomes under a [`CheckLogic`].
pub struct VerdictCombiner<'a> {
    custom_message: Option<&'a str>,
}

impl<'a> VerdictCombiner<'a> {
    pub fn new() -> Self {
        Self {
            custom_message: None,
        }
    }

    /// Use `message` instead of the default on failure. Empty strings are ignored.
    pub fn with_custom_message(mut self, message: Option<&'a str>) -> Self {
        self.custom_message = message.filter(|m| !m.is_empty());
        self
    }

    pub fn combine(&self, outcomes: &CheckOutcomes, logic: CheckLogic) -> Verdict {
        let passed = match logic {
            CheckLogic::And => outcomes.iter().all(|outcome| outcome.passed),
            CheckLogic::Or => outcomes.enabled().any(|outcome| outcome.passed),
        };

        if passed {
            return Verdict::pass();
        }

        if outcomes.enabled().next().is_none() {
            tracing::warn!(logic = %logic, "No checks enabled");
        }

        Verdict::fail(self.failure_message(logic))
    }

    fn failure_message(&self, logic: CheckLogic) -> String {
        if let Some(custom) = self.custom_message {
            return custom.to_string();
        }
        match logic {
            CheckLogic::And => AND_FAILURE_MESSAGE.to_string(),
            CheckLogic::Or => OR_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl Default for VerdictCombiner<'_> {
    fn default() -> Self {
        Self::new()
    }
}
