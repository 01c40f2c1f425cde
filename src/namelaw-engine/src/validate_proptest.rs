// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Property-based tests for name validation using proptest.
//!
//! These tests verify that:
//! 1. Plain names within a state's limit are accepted everywhere
//! 2. Over-limit names are rejected as too long whatever they contain,
//!    surrounding whitespace included
//! 3. Blank input is always reported as empty

use proptest::prelude::*;

use crate::datamodel::RuleTable;
use crate::validate::{Status, validate};

fn state_strategy() -> impl Strategy<Value = String> {
    let states: Vec<String> = RuleTable::builtin().states().map(str::to_owned).collect();
    proptest::sample::select(states)
}

/// States whose pattern admits letters, hyphens and apostrophes.
fn permissive_state_strategy() -> impl Strategy<Value = String> {
    let rules = RuleTable::builtin();
    let states: Vec<String> = rules
        .states()
        .filter(|s| rules.is_allowed(s, "O'Neil-Smith") == Some(true))
        .map(str::to_owned)
        .collect();
    proptest::sample::select(states)
}

fn within_limit(state: &str, name: String) -> String {
    match RuleTable::builtin().get(state).and_then(|r| r.max_length) {
        Some(limit) => name.chars().take(limit).collect(),
        None => name,
    }
}

fn junk_char_strategy() -> impl Strategy<Value = char> {
    prop_oneof![
        Just('a'),
        Just('Z'),
        Just('7'),
        Just(' '),
        Just('\''),
        Just('é'),
        Just('!'),
    ]
}

proptest! {
    #[test]
    fn letters_only_names_are_ok(state in state_strategy(), name in "[A-Za-z]{1,30}") {
        let name = within_limit(&state, name);
        let verdict = validate(RuleTable::builtin(), &state, &name).unwrap();
        prop_assert_eq!(Status::Ok, verdict.status, "{} rejected {}", state, name);
    }

    #[test]
    fn punctuated_names_are_ok_where_permitted(
        state in permissive_state_strategy(),
        name in "[A-Za-z][A-Za-z'-]{0,29}",
    ) {
        let name = within_limit(&state, name);
        let verdict = validate(RuleTable::builtin(), &state, &name).unwrap();
        prop_assert_eq!(Status::Ok, verdict.status, "{} rejected {}", state, name);
    }

    #[test]
    fn over_limit_is_too_long(
        state in state_strategy(),
        extra in 1usize..20,
        fill in proptest::collection::vec(junk_char_strategy(), 1..8),
    ) {
        let Some(limit) = RuleTable::builtin().get(&state).and_then(|r| r.max_length) else {
            return Ok(());
        };
        // starts and ends with a letter so it is never blank
        let mut name = String::from("x");
        name.extend(fill.iter().cycle().take(limit + extra - 2));
        name.push('x');

        let verdict = validate(RuleTable::builtin(), &state, &name).unwrap();
        prop_assert_eq!(Status::TooLong { limit }, verdict.status);
        prop_assert!(verdict.message.contains(&limit.to_string()));
    }

    #[test]
    fn padding_counts_toward_limit(
        state in state_strategy(),
        left in 1usize..4,
        right in 0usize..4,
    ) {
        let Some(limit) = RuleTable::builtin().get(&state).and_then(|r| r.max_length) else {
            return Ok(());
        };
        // exactly `limit` letters once the spaces are stripped
        let name = format!("{}{}{}", " ".repeat(left), "a".repeat(limit), " ".repeat(right));
        let verdict = validate(RuleTable::builtin(), &state, &name).unwrap();
        prop_assert_eq!(Status::TooLong { limit }, verdict.status);
    }

    #[test]
    fn blank_is_empty(state in state_strategy(), blank in "[ \t\n]{0,5}") {
        let verdict = validate(RuleTable::builtin(), &state, &blank).unwrap();
        prop_assert_eq!(Status::Empty, verdict.status);
    }
}
