// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Square-tile map, legends and choropleth fills.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Serialize;

use crate::color::{ColorScale, Rgb};
use crate::datamodel::{Dataset, GRID_COLS, GRID_ROWS, GridTable, StateDirectory};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TileCell {
    pub abbr: String,
    pub row: u8,
    pub col: u8,
    pub color: Rgb,
    /// Abbreviation, with a trailing `*` for estimated data.
    pub label: String,
    pub value: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TileMap {
    pub rows: u8,
    pub cols: u8,
    pub cells: Vec<TileCell>,
}

impl TileMap {
    /// Color every tile.  Tiles without data, or with a value outside the
    /// scale's domain, get the scale's fallback color.
    pub fn build(grid: &GridTable, scale: &ColorScale) -> Self {
        let mut cells: Vec<TileCell> = grid
            .iter()
            .map(|(abbr, tile)| {
                let value = Some(tile.value).filter(|_| tile.has_data());
                let color = match value {
                    Some(v) if scale.contains(v) => scale.color_at(v),
                    _ => scale.fallback(),
                };
                let label = if tile.asterisk {
                    format!("{abbr}*")
                } else {
                    abbr.to_owned()
                };
                TileCell {
                    abbr: abbr.to_owned(),
                    row: tile.row,
                    col: tile.col,
                    color,
                    label,
                    value,
                }
            })
            .collect();
        cells.sort_by_key(|c| (c.row, c.col));

        TileMap {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            cells,
        }
    }

    pub fn cell_at(&self, row: u8, col: u8) -> Option<&TileCell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }

    /// Plain-text rendering: one 4-wide column per tile, `.` for empty cells.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for row in 1..=self.rows {
            let line: String = (1..=self.cols)
                .map(|col| match self.cell_at(row, col) {
                    Some(cell) => format!("{:<4}", cell.label),
                    None => format!("{:<4}", "."),
                })
                .collect();
            let _ = writeln!(out, "{}", line.trim_end());
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Legend {
    pub title: &'static str,
    pub entries: Vec<LegendEntry>,
    pub note: &'static str,
}

impl Legend {
    pub fn for_dataset(dataset: Dataset) -> Self {
        let scale = ColorScale::for_dataset(dataset);
        let labels = level_labels(dataset);
        let entries = labels
            .iter()
            .enumerate()
            .map(|(i, &label)| LegendEntry {
                label,
                color: scale.color_at((i + 1) as f64),
            })
            .collect();
        let (title, note) = match dataset {
            Dataset::Diacritics => (
                "Accents Permitted in First Names",
                "Light to dark blue shows increasing restriction. Asterisks mark data not from an official source.",
            ),
            Dataset::Length => (
                "First Name Length Restrictions",
                "Light to dark red shows increasing restriction. Grey tiles have no length limit on record.",
            ),
        };
        Legend {
            title,
            entries,
            note,
        }
    }
}

/// Display label for each restriction level, starting at level 1.
pub fn level_labels(dataset: Dataset) -> &'static [&'static str] {
    match dataset {
        Dataset::Diacritics => &["No Restrictions", "Some Restrictions", "Many Restrictions"],
        Dataset::Length => &[
            "Lesser (1)",
            "Less (2)",
            "Moderate (3)",
            "Great (4)",
            "Greater (5)",
        ],
    }
}

/// Full state name -> fill color, for a geographic map keyed by name.
pub fn choropleth(
    grid: &GridTable,
    states: &StateDirectory,
    scale: &ColorScale,
) -> BTreeMap<String, Rgb> {
    states
        .iter()
        .map(|(name, abbr)| (name.to_owned(), scale.color_for(grid.value(abbr))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::NO_DATA;

    #[test]
    fn test_builtin_tile_map() {
        let grid = GridTable::builtin(Dataset::Diacritics);
        let map = TileMap::build(grid, &ColorScale::diacritics());
        assert_eq!(51, map.cells.len());

        let alaska = map.cell_at(1, 1).unwrap();
        assert_eq!("AK", alaska.abbr);
        assert_eq!("AK*", alaska.label);

        let dc = map.cells.iter().find(|c| c.abbr == "DC").unwrap();
        assert_eq!(NO_DATA, dc.color);
        assert_eq!(None, dc.value);

        let co = map.cells.iter().find(|c| c.abbr == "CO").unwrap();
        assert_eq!(ColorScale::diacritics().color_at(3.0), co.color);
    }

    #[test]
    fn test_out_of_domain_value_gets_fallback() {
        let grid = GridTable::from_json(r#"{"XX": {"row": 1, "col": 1, "value": 7}}"#).unwrap();
        let map = TileMap::build(&grid, &ColorScale::diacritics());
        assert_eq!(NO_DATA, map.cells[0].color);
        assert_eq!(Some(7.0), map.cells[0].value);
    }

    #[test]
    fn test_render_text() {
        let grid = GridTable::from_json(
            r#"{
                "AA": {"row": 1, "col": 1, "value": 1},
                "BB": {"row": 1, "col": 3, "value": 1, "asterisk": true}
            }"#,
        )
        .unwrap();
        let text = TileMap::build(&grid, &ColorScale::diacritics()).render_text();
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("AA  .   BB* ."), "{first}");
        assert_eq!(4 * (GRID_COLS as usize - 1) + 1, first.len());
        assert_eq!(GRID_ROWS as usize, text.lines().count());
    }

    #[test]
    fn test_legends() {
        let legend = Legend::for_dataset(Dataset::Length);
        assert_eq!(5, legend.entries.len());
        assert_eq!("Lesser (1)", legend.entries[0].label);
        assert_eq!("#ff0000", legend.entries[0].color.to_string());
        assert_eq!("#300000", legend.entries[4].color.to_string());

        let legend = Legend::for_dataset(Dataset::Diacritics);
        assert_eq!(3, legend.entries.len());
        assert_eq!("Many Restrictions", legend.entries[2].label);
    }

    #[test]
    fn test_choropleth() {
        let fills = choropleth(
            GridTable::builtin(Dataset::Length),
            StateDirectory::builtin(),
            &ColorScale::length(),
        );
        assert_eq!(51, fills.len());
        assert_eq!(NO_DATA, fills["California"]);
        assert_ne!(NO_DATA, fills["Colorado"]);
    }
}
