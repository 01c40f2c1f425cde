// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Static naming-law data: the per-state rule table, the tile-grid
//! datasets and the state name directory.
//!
//! Everything here is read-only once loaded. The builtin tables are parsed
//! from JSON embedded at compile time.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::common::Result;
use crate::data_err;

/// Number of columns in the square-tile map.
pub const GRID_COLS: u8 = 11;
/// Number of rows in the square-tile map.
pub const GRID_ROWS: u8 = 8;

const NAMING_LAWS_JSON: &str = include_str!("../data/naming_laws.json");
const DIACRITICS_JSON: &str = include_str!("../data/grid_diacritics.json");
const LENGTH_JSON: &str = include_str!("../data/grid_length.json");
const STATES_JSON: &str = include_str!("../data/states.json");

lazy_static! {
    static ref BUILTIN_RULES: RuleTable =
        RuleTable::from_json(NAMING_LAWS_JSON).expect("embedded naming laws are valid");
    static ref BUILTIN_DIACRITICS: GridTable =
        GridTable::from_json(DIACRITICS_JSON).expect("embedded diacritics grid is valid");
    static ref BUILTIN_LENGTH: GridTable =
        GridTable::from_json(LENGTH_JSON).expect("embedded length grid is valid");
    static ref BUILTIN_STATES: StateDirectory =
        StateDirectory::from_json(STATES_JSON).expect("embedded state directory is valid");
}

/// One state's naming law.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRule {
    /// Human readable summary of the statute or regulation.
    pub rule: String,
    /// Regex body the whole name must match, e.g. `[A-Za-z'-]+`.
    pub allowed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// State name -> naming law, with each `allowed` pattern compiled once and
/// anchored so it has to match the entire name.
#[derive(Clone, Debug)]
pub struct RuleTable {
    rules: BTreeMap<String, StateRule>,
    patterns: BTreeMap<String, Regex>,
}

impl RuleTable {
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: BTreeMap<String, StateRule> = serde_json::from_str(json)?;
        Self::from_rules(rules)
    }

    pub fn from_rules(rules: BTreeMap<String, StateRule>) -> Result<Self> {
        let mut patterns = BTreeMap::new();
        for (state, rule) in &rules {
            let anchored = format!("^(?:{})$", rule.allowed);
            let re = match Regex::new(&anchored) {
                Ok(re) => re,
                Err(err) => {
                    return data_err!(BadPattern, format!("{state}: {err}"));
                }
            };
            patterns.insert(state.clone(), re);
        }
        Ok(RuleTable { rules, patterns })
    }

    /// The rule table compiled into the binary.
    pub fn builtin() -> &'static RuleTable {
        &BUILTIN_RULES
    }

    pub fn get(&self, state: &str) -> Option<&StateRule> {
        self.rules.get(state)
    }

    pub fn pattern(&self, state: &str) -> Option<&Regex> {
        self.patterns.get(state)
    }

    /// Whether `name` fully matches the state's allowed pattern.  `None`
    /// for states not in the table.
    pub fn is_allowed(&self, state: &str, name: &str) -> Option<bool> {
        self.patterns.get(state).map(|re| re.is_match(name))
    }

    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateRule)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Which restriction dataset a grid carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dataset {
    /// Accent (diacritic) restrictions, levels 1..=3.
    Diacritics,
    /// First-name length restrictions, levels 1..=5.
    Length,
}

impl Dataset {
    pub fn name(self) -> &'static str {
        match self {
            Dataset::Diacritics => "diacritics",
            Dataset::Length => "length",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One tile in the square-tile map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridTile {
    pub row: u8,
    pub col: u8,
    /// Restriction value; zero or negative means no data.
    pub value: f64,
    /// Set when the value isn't from an official source.
    #[serde(default)]
    pub asterisk: bool,
    /// Set when the state's length limit covers the first name only rather
    /// than the full name.
    #[serde(default)]
    pub first_name_only: bool,
}

impl GridTile {
    pub fn has_data(&self) -> bool {
        self.value.is_finite() && self.value > 0.0
    }
}

/// Abbreviation -> tile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridTable {
    tiles: BTreeMap<String, GridTile>,
}

impl GridTable {
    pub fn from_json(json: &str) -> Result<Self> {
        let tiles: BTreeMap<String, GridTile> = serde_json::from_str(json)?;
        Self::from_tiles(tiles)
    }

    /// Checks that every tile sits inside the grid and no two states share
    /// a cell.
    pub fn from_tiles(tiles: BTreeMap<String, GridTile>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for (abbr, tile) in &tiles {
            if tile.row == 0 || tile.row > GRID_ROWS || tile.col == 0 || tile.col > GRID_COLS {
                return data_err!(
                    BadDataset,
                    format!("{abbr}: cell ({}, {}) is off the grid", tile.row, tile.col)
                );
            }
            if !seen.insert((tile.row, tile.col)) {
                return data_err!(
                    BadDataset,
                    format!("{abbr}: cell ({}, {}) already taken", tile.row, tile.col)
                );
            }
        }
        Ok(GridTable { tiles })
    }

    pub fn builtin(dataset: Dataset) -> &'static GridTable {
        match dataset {
            Dataset::Diacritics => &BUILTIN_DIACRITICS,
            Dataset::Length => &BUILTIN_LENGTH,
        }
    }

    pub fn get(&self, abbr: &str) -> Option<&GridTile> {
        self.tiles.get(abbr)
    }

    /// Restriction value for `abbr`, only when it carries data.
    pub fn value(&self, abbr: &str) -> Option<f64> {
        self.tiles
            .get(abbr)
            .filter(|t| t.has_data())
            .map(|t| t.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GridTile)> {
        self.tiles.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
struct StateName {
    name: String,
    abbr: String,
}

/// Bidirectional full name <-> postal abbreviation lookup, used to join the
/// rule table (keyed by name) with the grids (keyed by abbreviation).
#[derive(Clone, Debug, Default)]
pub struct StateDirectory {
    by_name: BTreeMap<String, String>,
    by_abbr: BTreeMap<String, String>,
}

impl StateDirectory {
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<StateName> = serde_json::from_str(json)?;
        let mut dir = StateDirectory::default();
        for entry in entries {
            if dir.by_abbr.contains_key(&entry.abbr) || dir.by_name.contains_key(&entry.name) {
                return data_err!(BadDataset, format!("duplicate state {}", entry.name));
            }
            dir.by_abbr.insert(entry.abbr.clone(), entry.name.clone());
            dir.by_name.insert(entry.name, entry.abbr);
        }
        Ok(dir)
    }

    pub fn builtin() -> &'static StateDirectory {
        &BUILTIN_STATES
    }

    pub fn abbr_for(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(|s| s.as_str())
    }

    pub fn name_for(&self, abbr: &str) -> Option<&str> {
        self.by_abbr.get(abbr).map(|s| s.as_str())
    }

    /// `(name, abbr)` pairs ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_name.iter().map(|(n, a)| (n.as_str(), a.as_str()))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
