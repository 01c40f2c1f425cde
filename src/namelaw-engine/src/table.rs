// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::cmp::Ordering;

use serde::Serialize;

use crate::datamodel::{RuleTable, StateDirectory};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RuleRow {
    pub state: String,
    pub abbr: Option<String>,
    pub max_length: Option<usize>,
    pub allows_apostrophe: bool,
    pub allows_hyphen: bool,
    pub allows_accents: bool,
    pub link: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Column {
    State,
    Abbr,
    MaxLength,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Filterable, sortable view over the rule table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleTableView {
    rows: Vec<RuleRow>,
}

impl RuleTableView {
    pub fn new(rules: &RuleTable, states: &StateDirectory) -> Self {
        let rows = rules
            .iter()
            .map(|(state, rule)| RuleRow {
                state: state.to_owned(),
                abbr: states.abbr_for(state).map(str::to_owned),
                max_length: rule.max_length,
                allows_apostrophe: rules.is_allowed(state, "O'Neil") == Some(true),
                allows_hyphen: rules.is_allowed(state, "Mary-Jane") == Some(true),
                allows_accents: rules.is_allowed(state, "Zoë") == Some(true),
                link: rule.link.clone(),
            })
            .collect();
        RuleTableView { rows }
    }

    pub fn rows(&self) -> &[RuleRow] {
        &self.rows
    }

    /// Rows whose state name or abbreviation contains `query`, ignoring
    /// case.  An empty query keeps every row.
    pub fn filter(&self, query: &str) -> Self {
        let query = query.trim().to_lowercase();
        let rows = self
            .rows
            .iter()
            .filter(|row| {
                row.state.to_lowercase().contains(&query)
                    || row
                        .abbr
                        .as_ref()
                        .is_some_and(|a| a.to_lowercase().contains(&query))
            })
            .cloned()
            .collect();
        RuleTableView { rows }
    }

    /// Stable sort.  Rows missing the sort value go last in either order.
    pub fn sort_by(mut self, column: Column, order: SortOrder) -> Self {
        fn directed(ord: Ordering, order: SortOrder) -> Ordering {
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        }
        fn missing_last<T: Ord>(a: Option<T>, b: Option<T>, order: SortOrder) -> Ordering {
            match (a, b) {
                (Some(a), Some(b)) => directed(a.cmp(&b), order),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }

        self.rows.sort_by(|a, b| match column {
            Column::State => directed(a.state.cmp(&b.state), order),
            Column::Abbr => missing_last(a.abbr.as_ref(), b.abbr.as_ref(), order),
            Column::MaxLength => missing_last(a.max_length, b.max_length, order),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> RuleTableView {
        RuleTableView::new(RuleTable::builtin(), StateDirectory::builtin())
    }

    #[test]
    fn test_rows_cover_every_state() {
        let view = view();
        assert_eq!(51, view.rows().len());
        let co = view.rows().iter().find(|r| r.state == "Colorado").unwrap();
        assert_eq!(Some("CO".to_owned()), co.abbr);
        assert!(!co.allows_apostrophe);
        assert!(co.allows_hyphen);
        assert!(!co.allows_accents);
    }

    #[test]
    fn test_filter() {
        let view = view();
        let new = view.filter("new");
        assert_eq!(4, new.rows().len());
        assert!(new.rows().iter().all(|r| r.state.starts_with("New")));

        let by_abbr = view.filter("ak");
        assert_eq!(1, by_abbr.rows().len());
        assert_eq!("Alaska", by_abbr.rows()[0].state);

        let by_name = view.filter("KAN");
        let names: Vec<&str> = by_name.rows().iter().map(|r| r.state.as_str()).collect();
        assert_eq!(vec!["Arkansas", "Kansas"], names);

        assert_eq!(51, view.filter("  ").rows().len());
        assert!(view.filter("atlantis").rows().is_empty());
    }

    #[test]
    fn test_sort_by_max_length() {
        let sorted = view().sort_by(Column::MaxLength, SortOrder::Descending);
        assert_eq!(Some(141), sorted.rows()[0].max_length);
        assert_eq!(None, sorted.rows().last().unwrap().max_length);

        let sorted = view().sort_by(Column::MaxLength, SortOrder::Ascending);
        assert_eq!(Some(30), sorted.rows()[0].max_length);
        assert_eq!(None, sorted.rows().last().unwrap().max_length);
    }

    #[test]
    fn test_sort_is_stable() {
        // Kentucky and Virginia share a limit of 30; name order survives
        let sorted = view().sort_by(Column::MaxLength, SortOrder::Ascending);
        let names: Vec<&str> = sorted.rows()[..2].iter().map(|r| r.state.as_str()).collect();
        assert_eq!(vec!["Kentucky", "Virginia"], names);
    }

    #[test]
    fn test_sort_by_state_descending() {
        let sorted = view().sort_by(Column::State, SortOrder::Descending);
        assert_eq!("Wyoming", sorted.rows()[0].state);
    }
}
