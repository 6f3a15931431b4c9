//! Configuration parsing from YAML/JSON and the typed default merge.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::types::CheckKind;

/// Default project key used when no configuration names one.
pub const DEFAULT_PROJECT: &str = "PROJ";

/// Default configuration file name looked up in the repository.
pub const DEFAULT_CONFIG_PATH: &str = "pr-lint.yml";

/// Errors that can occur when parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// How individual check outcomes combine into the final verdict.
///
/// Any string other than `"or"` reads as [`CheckLogic::And`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum CheckLogic {
    /// Every enabled check must pass
    #[default]
    And,

    /// At least one enabled check must pass
    Or,
}

impl From<String> for CheckLogic {
    fn from(value: String) -> Self {
        match value.as_str() {
            "or" => CheckLogic::Or,
            _ => CheckLogic::And,
        }
    }
}

impl fmt::Display for CheckLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckLogic::And => write!(f, "and"),
            CheckLogic::Or => write!(f, "or"),
        }
    }
}

/// User-supplied overrides. Every field is optional and unknown keys are ignored.
///
/// Keys are read one at a time: a value of the wrong type is skipped with a
/// warning and the remaining keys still apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverride {
    pub projects: Option<Vec<String>>,
    pub check_title: Option<bool>,
    pub check_branch: Option<bool>,
    pub check_commits: Option<bool>,
    pub check_description: Option<bool>,
    pub ignore_case: Option<bool>,
    pub require_brackets: Option<bool>,
    pub check_logic: Option<CheckLogic>,
}

impl ConfigOverride {
    /// Parse overrides from a YAML document. Empty and `null` documents yield no overrides.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if is_blank_document(yaml) {
            return Ok(Self::default());
        }
        let document: Value = serde_yaml::from_str(yaml)?;
        Self::from_document(document)
    }

    /// Parse overrides from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let document: Value = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    fn from_document(document: Value) -> Result<Self, ConfigError> {
        if document.is_null() {
            return Ok(Self::default());
        }
        // Anything but a mapping at the top level is a malformed document
        let mapping: Mapping = serde_yaml::from_value(document)?;

        Ok(Self {
            projects: read_key(&mapping, "projects"),
            check_title: read_key(&mapping, "check_title"),
            check_branch: read_key(&mapping, "check_branch"),
            check_commits: read_key(&mapping, "check_commits"),
            check_description: read_key(&mapping, "check_description"),
            ignore_case: read_key(&mapping, "ignore_case"),
            require_brackets: read_key(&mapping, "require_brackets"),
            check_logic: read_key(&mapping, "check_logic"),
        })
    }
}

/// Typed value of `key`. Absent, `null` and wrongly typed values read as `None`.
fn read_key<T: DeserializeOwned>(mapping: &Mapping, key: &str) -> Option<T> {
    let value = mapping.get(key)?;
    if value.is_null() {
        return None;
    }
    match serde_yaml::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring config value of the wrong type");
            None
        }
    }
}

fn is_blank_document(yaml: &str) -> bool {
    yaml.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}

/// Fully resolved configuration for one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Approved project keys, in order. Never empty.
    pub projects: Vec<String>,

    pub check_title: bool,
    pub check_branch: bool,
    pub check_commits: bool,
    pub check_description: bool,

    /// Fold both keys and text to lowercase before matching
    pub ignore_case: bool,

    /// Title and description must carry `[KEY-123]` with brackets
    pub require_brackets: bool,

    pub check_logic: CheckLogic,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            projects: vec![DEFAULT_PROJECT.to_string()],
            check_title: true,
            check_branch: false,
            check_commits: false,
            check_description: false,
            ignore_case: false,
            require_brackets: true,
            check_logic: CheckLogic::And,
        }
    }
}

impl Configuration {
    /// Defaults merged with the overrides in a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(Self::default().merge(ConfigOverride::from_yaml(yaml)?))
    }

    /// Defaults merged with the overrides in a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(Self::default().merge(ConfigOverride::from_json(json)?))
    }

    /// Read a configuration file. `.json` files parse as JSON, everything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents),
            _ => Self::from_yaml(&contents),
        }
    }

    /// Apply overrides field by field.
    ///
    /// A present `projects` list replaces the current list wholesale. An empty
    /// list is ignored so the resolved configuration always names a project.
    pub fn merge(mut self, overrides: ConfigOverride) -> Self {
        match overrides.projects {
            Some(projects) if projects.is_empty() => {
                tracing::warn!(
                    kept = ?self.projects,
                    "Ignoring empty `projects` list in configuration"
                );
            }
            Some(projects) => self.projects = projects,
            None => {}
        }

        if let Some(v) = overrides.check_title {
            self.check_title = v;
        }
        if let Some(v) = overrides.check_branch {
            self.check_branch = v;
        }
        if let Some(v) = overrides.check_commits {
            self.check_commits = v;
        }
        if let Some(v) = overrides.check_description {
            self.check_description = v;
        }
        if let Some(v) = overrides.ignore_case {
            self.ignore_case = v;
        }
        if let Some(v) = overrides.require_brackets {
            self.require_brackets = v;
        }
        if let Some(v) = overrides.check_logic {
            self.check_logic = v;
        }

        self
    }

    /// Whether the given check is switched on.
    pub fn is_enabled(&self, kind: CheckKind) -> bool {
        match kind {
            CheckKind::Title => self.check_title,
            CheckKind::Branch => self.check_branch,
            CheckKind::Description => self.check_description,
            CheckKind::Commits => self.check_commits,
        }
    }

    /// Enabled checks in canonical order.
    pub fn enabled_checks(&self) -> Vec<CheckKind> {
        CheckKind::ALL
            .into_iter()
            .filter(|kind| self.is_enabled(*kind))
            .collect()
    }

    /// Project keys as they should be matched: lowercased when `ignore_case` is set.
    pub fn match_keys(&self) -> Vec<String> {
        self.projects
            .iter()
            .map(|project| crate::patterns::fold_case(project, self.ignore_case).into_owned())
            .collect()
    }
}
