//! Core types shared by the checks and the verdict combiner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::CheckLogic;

/// The four validation dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Title,
    Branch,
    Description,
    Commits,
}

impl CheckKind {
    /// Canonical evaluation order.
    pub const ALL: [CheckKind; 4] = [
        CheckKind::Title,
        CheckKind::Branch,
        CheckKind::Description,
        CheckKind::Commits,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::Title => "title",
            CheckKind::Branch => "branch",
            CheckKind::Description => "description",
            CheckKind::Commits => "commits",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Snapshot of the pull-request text the checks look at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestContext {
    pub title: String,

    /// Head branch name (e.g. `feature/PROJ-12-login`)
    pub branch_ref: String,

    /// PR body; absent is treated as empty
    #[serde(default)]
    pub description: Option<String>,

    /// Commit messages, populated only when the commits check is enabled
    #[serde(default)]
    pub commit_messages: Vec<String>,
}

impl PullRequestContext {
    pub fn new(title: impl Into<String>, branch_ref: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            branch_ref: branch_ref.into(),
            description: None,
            commit_messages: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_commit_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commit_messages = messages.into_iter().map(Into::into).collect();
        self
    }

    /// The description, with an absent body read as the empty string.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Result of a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub kind: CheckKind,
    pub enabled: bool,
    pub passed: bool,

    /// One line per detected failure
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
}

impl CheckOutcome {
    /// Outcome of a disabled check: a pass with nothing to report.
    pub fn vacuous(kind: CheckKind) -> Self {
        Self {
            kind,
            enabled: false,
            passed: true,
            diagnostics: Vec::new(),
        }
    }

    pub fn passed(kind: CheckKind) -> Self {
        Self {
            kind,
            enabled: true,
            passed: true,
            diagnostics: Vec::new(),
        }
    }

    pub fn failed(kind: CheckKind, diagnostics: Vec<String>) -> Self {
        Self {
            kind,
            enabled: true,
            passed: false,
            diagnostics,
        }
    }
}

/// Outcomes of all four checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcomes {
    pub title: CheckOutcome,
    pub branch: CheckOutcome,
    pub description: CheckOutcome,
    pub commits: CheckOutcome,
}

impl CheckOutcomes {
    /// Every check disabled.
    pub fn all_vacuous() -> Self {
        Self {
            title: CheckOutcome::vacuous(CheckKind::Title),
            branch: CheckOutcome::vacuous(CheckKind::Branch),
            description: CheckOutcome::vacuous(CheckKind::Description),
            commits: CheckOutcome::vacuous(CheckKind::Commits),
        }
    }

    pub fn get(&self, kind: CheckKind) -> &CheckOutcome {
        match kind {
            CheckKind::Title => &self.title,
            CheckKind::Branch => &self.branch,
            CheckKind::Description => &self.description,
            CheckKind::Commits => &self.commits,
        }
    }

    pub fn set(&mut self, outcome: CheckOutcome) {
        match outcome.kind {
            CheckKind::Title => self.title = outcome,
            CheckKind::Branch => self.branch = outcome,
            CheckKind::Description => self.description = outcome,
            CheckKind::Commits => self.commits = outcome,
        }
    }

    /// Outcomes in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &CheckOutcome> {
        CheckKind::ALL.into_iter().map(move |kind| self.get(kind))
    }

    /// Outcomes of enabled checks only.
    pub fn enabled(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.iter().filter(|outcome| outcome.enabled)
    }
}

/// The single pass/fail answer reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub passed: bool,

    /// Failure message; `None` on a pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            passed: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: Some(message.into()),
        }
    }
}

/// Full result of one evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub verdict: Verdict,
    pub outcomes: CheckOutcomes,
    pub logic: CheckLogic,
    pub evaluated_at: DateTime<Utc>,
}

impl EvaluationResult {
    /// Every diagnostic line, in check order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .flat_map(|outcome| outcome.diagnostics.iter().map(String::as_str))
    }
}
