// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::datamodel::{Dataset, GridTable, RuleTable, StateDirectory};

/// Series a correlation point belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    /// Length limit applies to the first name only.
    A,
    /// Length limit applies to the full name.
    B,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Category::A => "first name only",
            Category::B => "full name",
        };
        write!(f, "{name}")
    }
}

/// One state's (length limit, accent restriction level) pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DataPoint {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub category: Category,
}

impl DataPoint {
    pub fn new(id: impl Into<String>, x: f64, y: f64, category: Category) -> Self {
        DataPoint {
            id: id.into(),
            x,
            y,
            category,
        }
    }
}

/// Join the rule table with the grid datasets.  States with no length
/// limit or no accent data are left out.
pub fn derive_points(
    rules: &RuleTable,
    states: &StateDirectory,
    diacritics: &GridTable,
    length: &GridTable,
) -> Vec<DataPoint> {
    let mut points = Vec::new();
    for (state, rule) in rules.iter() {
        let Some(abbr) = states.abbr_for(state) else {
            warn!(state, "no abbreviation for state, skipping");
            continue;
        };
        let Some(x) = rule.max_length.map(|l| l as f64).filter(|&x| x > 0.0) else {
            continue;
        };
        let Some(y) = diacritics.value(abbr) else {
            continue;
        };
        let category = match length.get(abbr) {
            Some(tile) if tile.first_name_only => Category::A,
            _ => Category::B,
        };
        points.push(DataPoint::new(abbr, x, y, category));
    }
    points
}

/// Points derived from the builtin tables.
pub fn builtin_points() -> Vec<DataPoint> {
    derive_points(
        RuleTable::builtin(),
        StateDirectory::builtin(),
        GridTable::builtin(Dataset::Diacritics),
        GridTable::builtin(Dataset::Length),
    )
}
