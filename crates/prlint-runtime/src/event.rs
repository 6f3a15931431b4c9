//! Pull-request event payloads.
//!
//! The host writes the triggering webhook payload to a JSON file; only the
//! fields the checks need are read.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use prlint_core::PullRequestContext;

use crate::sources::RepoRef;

/// Actions that trigger a lint run.
pub const SUPPORTED_ACTIONS: [&str; 5] = [
    "opened",
    "edited",
    "reopened",
    "synchronize",
    "ready_for_review",
];

/// Errors reading the event payload.
#[derive(Error, Debug)]
pub enum EventError {
    #[error("Failed to read event file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse event payload: {0}")]
    JsonError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: Owner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Head {
    #[serde(rename = "ref")]
    pub git_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,

    #[serde(default)]
    pub body: Option<String>,

    pub head: Head,
}

/// A `pull_request` webhook payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestEvent {
    /// Missing for manually dispatched runs
    #[serde(default)]
    pub action: Option<String>,

    pub repository: Repository,
    pub pull_request: PullRequest,
}

impl PullRequestEvent {
    pub fn from_json(json: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EventError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Whether this event should be linted. A missing action counts as supported.
    pub fn is_supported_action(&self) -> bool {
        match self.action.as_deref() {
            Some(action) => SUPPORTED_ACTIONS.contains(&action),
            None => true,
        }
    }

    pub fn repo(&self) -> RepoRef {
        RepoRef::new(
            self.repository.owner.login.clone(),
            self.repository.name.clone(),
        )
    }

    pub fn pull_number(&self) -> u64 {
        self.pull_request.number
    }

    pub fn head_ref(&self) -> &str {
        &self.pull_request.head.git_ref
    }

    /// PR text for the checks, without commit messages.
    pub fn to_context(&self) -> PullRequestContext {
        PullRequestContext {
            title: self.pull_request.title.clone(),
            branch_ref: self.pull_request.head.git_ref.clone(),
            description: self.pull_request.body.clone(),
            commit_messages: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "action": "opened",
        "number": 42,
        "pull_request": {
            "number": 42,
            "title": "Fix login bug [PROJ-42]",
            "body": null,
            "head": { "ref": "feature/PROJ-42-login", "sha": "abc123" },
            "base": { "ref": "main" }
        },
        "repository": {
            "name": "widgets",
            "full_name": "octo/widgets",
            "owner": { "login": "octo", "id": 1 }
        },
        "sender": { "login": "someone" }
    }"#;

    #[test]
    fn test_parse_payload() {
        let event = PullRequestEvent::from_json(PAYLOAD).unwrap();
        assert_eq!(event.action.as_deref(), Some("opened"));
        assert_eq!(event.repo(), RepoRef::new("octo", "widgets"));
        assert_eq!(event.pull_number(), 42);
        assert_eq!(event.head_ref(), "feature/PROJ-42-login");
    }

    #[test]
    fn test_null_body_becomes_empty_description() {
        let event = PullRequestEvent::from_json(PAYLOAD).unwrap();
        let context = event.to_context();
        assert_eq!(context.title, "Fix login bug [PROJ-42]");
        assert_eq!(context.description, None);
        assert_eq!(context.description_text(), "");
        assert!(context.commit_messages.is_empty());
    }

    #[test]
    fn test_supported_actions() {
        let mut event = PullRequestEvent::from_json(PAYLOAD).unwrap();
        for action in SUPPORTED_ACTIONS {
            event.action = Some(action.to_string());
            assert!(event.is_supported_action());
        }

        event.action = Some("closed".to_string());
        assert!(!event.is_supported_action());

        event.action = None;
        assert!(event.is_supported_action());
    }

    #[test]
    fn test_missing_pull_request_is_error() {
        let result = PullRequestEvent::from_json(r#"{"action": "push"}"#);
        assert!(matches!(result, Err(EventError::JsonError(_))));
    }
}
