//! Project-identifier patterns.
//!
//! Two shapes are recognised:
//! - **loose**: `KEY-123` or `KEY_123` anywhere in the text (branches, commits)
//! - **strict**: `[KEY-123]` with literal brackets (titles, descriptions), which
//!   degrades to the loose shape when brackets are not required
//!
//! The digit run may be empty, so `KEY-` and `[KEY-]` both match.
//!
//! Case-insensitive matching is done by lowercasing the key and the subject
//! text, never through the regex engine's `(?i)` mode.

use regex::Regex;
use std::borrow::Cow;

use crate::config::Configuration;

/// Lowercase `text` when `ignore_case` is set; borrow it unchanged otherwise.
pub fn fold_case(text: &str, ignore_case: bool) -> Cow<'_, str> {
    if ignore_case {
        Cow::Owned(text.to_lowercase())
    } else {
        Cow::Borrowed(text)
    }
}

/// A compiled project pattern.
#[derive(Debug, Clone)]
pub struct ProjectPattern {
    regex: Regex,
    fold_subject: bool,
}

impl ProjectPattern {
    /// Whether the pattern occurs anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(&fold_case(text, self.fold_subject))
    }
}

/// Unanchored `KEY[-_][0-9]*`, matched case-insensitively when `ignore_case` is set.
pub fn build_loose_pattern(
    project_key: &str,
    ignore_case: bool,
) -> Result<ProjectPattern, regex::Error> {
    let key = fold_case(project_key, ignore_case);
    let regex = Regex::new(&format!("{}[-_][0-9]*", regex::escape(&key)))?;
    Ok(ProjectPattern {
        regex,
        fold_subject: ignore_case,
    })
}

/// `\[KEY-[0-9]*\]` when `require_brackets` is set, otherwise the loose pattern.
///
/// No case folding happens here; callers that ignore case pass a lowercased
/// key and lowercase the text themselves.
pub fn build_strict_pattern(
    project_key: &str,
    require_brackets: bool,
) -> Result<ProjectPattern, regex::Error> {
    if !require_brackets {
        return build_loose_pattern(project_key, false);
    }
    let regex = Regex::new(&format!(r"\[{}-[0-9]*\]", regex::escape(project_key)))?;
    Ok(ProjectPattern {
        regex,
        fold_subject: false,
    })
}

/// Builds the per-project pattern sets for one configuration.
#[derive(Debug, Clone)]
pub struct PatternBuilder {
    keys: Vec<String>,
    ignore_case: bool,
    require_brackets: bool,
}

impl PatternBuilder {
    pub fn from_config(config: &Configuration) -> Self {
        Self {
            keys: config.match_keys(),
            ignore_case: config.ignore_case,
            require_brackets: config.require_brackets,
        }
    }

    /// Project keys, already case-folded when `ignore_case` is set.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// One loose pattern per project.
    pub fn loose_patterns(&self) -> Result<Vec<ProjectPattern>, regex::Error> {
        self.keys
            .iter()
            .map(|key| build_loose_pattern(key, self.ignore_case))
            .collect()
    }

    /// One strict pattern per project.
    pub fn strict_patterns(&self) -> Result<Vec<ProjectPattern>, regex::Error> {
        self.keys
            .iter()
            .map(|key| build_strict_pattern(key, self.require_brackets))
            .collect()
    }
}

/// Whether any pattern occurs in `text`.
pub fn any_match(patterns: &[ProjectPattern], text: &str) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(text))
}
