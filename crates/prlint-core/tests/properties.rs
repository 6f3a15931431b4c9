//! Property tests for patterns, commit filtering and verdict logic.

use proptest::prelude::*;

use prlint_core::{
    build_loose_pattern, build_strict_pattern, find_failed_commits, CheckKind, CheckLogic,
    CheckOutcome, CheckOutcomes, VerdictCombiner,
};

fn project_key() -> impl Strategy<Value = String> {
    "[A-Z]{2,6}"
}

fn digits() -> impl Strategy<Value = String> {
    "[0-9]{0,6}"
}

fn outcome_states() -> impl Strategy<Value = Vec<(bool, bool)>> {
    prop::collection::vec((any::<bool>(), any::<bool>()), 4)
}

fn build_outcomes(states: &[(bool, bool)]) -> CheckOutcomes {
    let mut outcomes = CheckOutcomes::all_vacuous();
    for (kind, (enabled, passed)) in CheckKind::ALL.into_iter().zip(states) {
        let outcome = match (*enabled, *passed) {
            (false, _) => CheckOutcome::vacuous(kind),
            (true, true) => CheckOutcome::passed(kind),
            (true, false) => CheckOutcome::failed(kind, vec!["failed".to_string()]),
        };
        outcomes.set(outcome);
    }
    outcomes
}

proptest! {
    #[test]
    fn loose_matches_dash_and_underscore(key in project_key(), d in digits(), prefix in "[a-z/ ]{0,10}") {
        let pattern = build_loose_pattern(&key, false).unwrap();
        let dash = format!("{}{}-{}", prefix, key, d);
        let underscore = format!("{}{}_{}", prefix, key, d);
        prop_assert!(pattern.is_match(&dash));
        prop_assert!(pattern.is_match(&underscore));
    }

    #[test]
    fn loose_ignore_case_matches_any_casing(key in project_key(), d in digits()) {
        let pattern = build_loose_pattern(&key, true).unwrap();
        let lower = format!("{}-{}", key.to_lowercase(), d);
        let upper = format!("{}_{}", key, d);
        prop_assert!(pattern.is_match(&lower));
        prop_assert!(pattern.is_match(&upper));

        let sensitive = build_loose_pattern(&key, false).unwrap();
        prop_assert!(!sensitive.is_match(&lower));
    }

    #[test]
    fn strict_requires_brackets(key in project_key(), d in digits()) {
        let pattern = build_strict_pattern(&key, true).unwrap();
        let bracketed = format!("[{}-{}]", key, d);
        let bare = format!("{}-{}", key, d);
        prop_assert!(pattern.is_match(&bracketed));
        prop_assert!(!pattern.is_match(&bare));
    }

    #[test]
    fn failed_commits_are_exactly_the_unreferenced_ones(
        key in project_key(),
        commits in prop::collection::vec((any::<bool>(), digits(), "[a-z ]{0,20}"), 0..20),
    ) {
        let mut messages = Vec::new();
        let mut expected = Vec::new();
        for (referenced, d, noise) in &commits {
            if *referenced {
                messages.push(format!("{}-{} {}", key, d, noise));
            } else {
                messages.push(noise.clone());
                expected.push(noise.clone());
            }
        }

        let failed = find_failed_commits(&[key.as_str()], &messages, false).unwrap();
        prop_assert_eq!(failed, expected);
    }

    #[test]
    fn and_mode_passes_iff_every_enabled_check_passes(states in outcome_states()) {
        let outcomes = build_outcomes(&states);
        let verdict = VerdictCombiner::new().combine(&outcomes, CheckLogic::And);
        let expected = states.iter().all(|(enabled, passed)| !enabled || *passed);
        prop_assert_eq!(verdict.passed, expected);
    }

    #[test]
    fn or_mode_passes_iff_some_enabled_check_passes(states in outcome_states()) {
        let outcomes = build_outcomes(&states);
        let verdict = VerdictCombiner::new().combine(&outcomes, CheckLogic::Or);
        let expected = states.iter().any(|(enabled, passed)| *enabled && *passed);
        prop_assert_eq!(verdict.passed, expected);
    }

    #[test]
    fn custom_message_used_on_any_failure(states in outcome_states(), or in any::<bool>()) {
        let logic = if or { CheckLogic::Or } else { CheckLogic::And };
        let outcomes = build_outcomes(&states);
        let verdict = VerdictCombiner::new()
            .with_custom_message(Some("custom failure"))
            .combine(&outcomes, logic);
        if !verdict.passed {
            prop_assert_eq!(verdict.message.as_deref(), Some("custom failure"));
        } else {
            prop_assert!(verdict.message.is_none());
        }
    }
}
