// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Checks a proposed first name against one state's naming law.
//!
//! Acceptance is decided only by the state's length limit and its `allowed`
//! pattern.  When a name is rejected by the pattern, a fixed-order cascade
//! of heuristics picks the reason shown to the user.  The heuristics are
//! advisory and can disagree with the state's actual rule (an apostrophe is
//! reported as an invalid character even in states that allow it), but the
//! order is kept stable so messages don't change between releases.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::common::{Error, ErrorCode, ErrorKind, Result};
use crate::datamodel::RuleTable;

lazy_static! {
    static ref INVALID_CHAR: Regex = Regex::new(r"[^A-Za-z\-]").unwrap();
    static ref DIGIT: Regex = Regex::new(r"[0-9]").unwrap();
    // Latin-1 supplement letters plus Latin Extended-A and -B.
    static ref ACCENTED: Regex = Regex::new(r"[À-ÖØ-öø-ÿĀ-ɏ]").unwrap();
}

/// Why a name failed the state's pattern.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Reason {
    InvalidCharacters,
    ContainsNumbers,
    NonEnglishCharacters,
    StateSpecific,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Reason::InvalidCharacters => "invalid characters",
            Reason::ContainsNumbers => "contains numbers",
            Reason::NonEnglishCharacters => "non-English characters not allowed",
            Reason::StateSpecific => "violates state-specific rules",
        };
        write!(f, "{text}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Empty,
    TooLong { limit: usize },
    Disallowed(Reason),
}

/// Outcome of validating one name, ready for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub state: String,
    pub status: Status,
    pub message: String,
    link: Option<String>,
}

impl Verdict {
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    /// Source for the state's rule, if the table has one.
    pub fn rule_link(&self) -> Option<&str> {
        self.link.as_deref()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Pick the reason shown for a rejected name.  Step 1 already catches every
/// digit and accented letter; steps 2 and 3 stay so the order is fixed if
/// step 1 is ever narrowed.
fn diagnose(pattern: &Regex, name: &str) -> Reason {
    if INVALID_CHAR.is_match(name) {
        return Reason::InvalidCharacters;
    }
    if DIGIT.is_match(name) {
        return Reason::ContainsNumbers;
    }
    for c in name.chars() {
        let mut buf = [0u8; 4];
        let c: &str = c.encode_utf8(&mut buf);
        if ACCENTED.is_match(c) && !pattern.is_match(c) {
            return Reason::NonEnglishCharacters;
        }
    }
    Reason::StateSpecific
}

/// Validate `name` against `state`'s law in `rules`.
///
/// The only error is a state missing from the table; every outcome for a
/// known state is a [`Verdict`].
pub fn validate(rules: &RuleTable, state: &str, name: &str) -> Result<Verdict> {
    let (rule, pattern) = match (rules.get(state), rules.pattern(state)) {
        (Some(rule), Some(pattern)) => (rule, pattern),
        _ => {
            return Err(Error::new(
                ErrorKind::Validation,
                ErrorCode::UnknownState,
                Some(state.to_owned()),
            ));
        }
    };

    // whitespace only counts as blank; every other check sees the name as
    // given
    let status = if name.trim().is_empty() {
        Status::Empty
    } else if let Some(limit) = rule.max_length.filter(|&limit| name.chars().count() > limit) {
        Status::TooLong { limit }
    } else if !pattern.is_match(name) {
        Status::Disallowed(diagnose(pattern, name))
    } else {
        Status::Ok
    };

    let message = match status {
        Status::Ok => format!("\"{name}\" is allowed in {state}."),
        Status::Empty => "Please enter a name.".to_owned(),
        Status::TooLong { limit } => {
            format!("Name is too long: {state} allows at most {limit} characters.")
        }
        Status::Disallowed(reason) => format!("\"{name}\" is not allowed in {state}: {reason}."),
    };

    Ok(Verdict {
        state: state.to_owned(),
        status,
        message,
        link: rule.link.clone(),
    })
}
