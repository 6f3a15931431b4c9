//! Commit filtering.

use crate::patterns::{any_match, build_loose_pattern};

/// Messages that reference none of `projects`, in input order.
///
/// Each message is tested against every project's loose pattern. Returned
/// messages are the original, unfolded text.
pub fn find_failed_commits<P, M>(
    projects: &[P],
    commit_messages: &[M],
    ignore_case: bool,
) -> Result<Vec<String>, regex::Error>
where
    P: AsRef<str>,
    M: AsRef<str>,
{
    let patterns = projects
        .iter()
        .map(|project| build_loose_pattern(project.as_ref(), ignore_case))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(commit_messages
        .iter()
        .map(AsRef::as_ref)
        .filter(|message| !any_match(&patterns, message))
        .map(str::to_string)
        .collect())
}
