//! End-to-end evaluation scenarios.

use prlint_core::{
    evaluate, CheckLogic, Configuration, PullRequestContext, AND_FAILURE_MESSAGE,
    OR_FAILURE_MESSAGE,
};

#[test]
fn bracketed_title_passes_with_defaults() {
    let config = Configuration::from_yaml("check_title: true").unwrap();
    let context = PullRequestContext::new("Fix login bug [PROJ-42]", "fix/login");

    let result = evaluate(&config, &context, None).unwrap();

    assert!(result.outcomes.title.passed);
    assert!(result.verdict.passed);
    assert!(result.verdict.message.is_none());
}

#[test]
fn missing_title_reference_fails_with_default_message() {
    let config = Configuration::from_yaml("check_title: true").unwrap();
    let context = PullRequestContext::new("Fix login bug", "fix/login");

    let result = evaluate(&config, &context, None).unwrap();

    assert!(!result.outcomes.title.passed);
    assert!(!result.verdict.passed);
    assert_eq!(result.verdict.message.as_deref(), Some(AND_FAILURE_MESSAGE));
}

#[test]
fn underscore_branch_reference_passes() {
    let config = Configuration::from_yaml(
        r#"
check_branch: true
projects: ["ABC"]
"#,
    )
    .unwrap();
    let context = PullRequestContext::new("[ABC-99] fix", "feature/ABC_99-fix");

    let result = evaluate(&config, &context, None).unwrap();

    assert!(result.outcomes.branch.enabled);
    assert!(result.outcomes.branch.passed);
    assert!(result.verdict.passed);
}

#[test]
fn or_logic_passes_when_commits_reference_a_project() {
    let config = Configuration::from_yaml(
        r#"
check_commits: true
check_logic: "or"
check_title: true
"#,
    )
    .unwrap();
    let context = PullRequestContext::new("Fix login bug", "fix/login")
        .with_commit_messages(["PROJ-7 fix login redirect"]);

    let result = evaluate(&config, &context, None).unwrap();

    assert_eq!(result.logic, CheckLogic::Or);
    assert!(!result.outcomes.title.passed);
    assert!(result.outcomes.commits.passed);
    assert!(result.verdict.passed);
}

#[test]
fn or_logic_fails_when_only_check_fails() {
    let config = Configuration::from_yaml(
        r#"
check_title: true
check_logic: "or"
"#,
    )
    .unwrap();
    let context = PullRequestContext::new("Fix login bug", "fix/login");

    let result = evaluate(&config, &context, None).unwrap();
    assert!(!result.verdict.passed);
    assert_eq!(result.verdict.message.as_deref(), Some(OR_FAILURE_MESSAGE));

    let custom = evaluate(&config, &context, Some("Reference a PROJ ticket")).unwrap();
    assert_eq!(
        custom.verdict.message.as_deref(),
        Some("Reference a PROJ ticket")
    );
}

#[test]
fn nothing_enabled_passes_under_and_but_fails_under_or() {
    let context = PullRequestContext::new("anything", "anything");

    let and = Configuration::from_yaml("check_title: false").unwrap();
    assert!(evaluate(&and, &context, None).unwrap().verdict.passed);

    let or = Configuration::from_yaml("check_title: false\ncheck_logic: or").unwrap();
    let result = evaluate(&or, &context, None).unwrap();
    assert!(!result.verdict.passed);
    assert_eq!(result.verdict.message.as_deref(), Some(OR_FAILURE_MESSAGE));
}

#[test]
fn ignore_case_applies_to_every_check() {
    let config = Configuration::from_yaml(
        r#"
projects: ["Proj"]
ignore_case: true
check_branch: true
check_description: true
check_commits: true
"#,
    )
    .unwrap();
    let context = PullRequestContext::new("[PROJ-1] Title", "proj_1-branch")
        .with_description("see [proj-1]")
        .with_commit_messages(["PrOj-1 commit"]);

    let result = evaluate(&config, &context, None).unwrap();
    assert!(result.outcomes.iter().all(|o| o.enabled && o.passed));
    assert!(result.verdict.passed);
}

#[test]
fn result_serializes_to_json() {
    let config = Configuration::default();
    let context = PullRequestContext::new("no reference", "main");
    let result = evaluate(&config, &context, None).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["verdict"]["passed"], false);
    assert_eq!(json["logic"], "and");
    assert_eq!(json["outcomes"]["title"]["kind"], "title");
}
