// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use serde::Serialize;

use crate::datamodel::{Dataset, GridTable};
use crate::grid::level_labels;

/// Share of states at one restriction level.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PercentageBar {
    pub level: usize,
    pub label: &'static str,
    pub count: usize,
    pub percent: f64,
}

impl PercentageBar {
    /// `#` bar scaled so 100% fills `width` characters.
    pub fn render(&self, width: usize) -> String {
        let filled = ((self.percent / 100.0) * width as f64).round() as usize;
        "#".repeat(filled.min(width))
    }
}

/// One bar per level of `dataset`, over the states that have data.
/// Values are rounded to the nearest level; anything outside the dataset's
/// levels is ignored.
pub fn percentage_bars(grid: &GridTable, dataset: Dataset) -> Vec<PercentageBar> {
    let labels = level_labels(dataset);
    let mut counts = vec![0usize; labels.len()];
    for (_, tile) in grid.iter() {
        if !tile.has_data() {
            continue;
        }
        let level = tile.value.round() as usize;
        if (1..=labels.len()).contains(&level) {
            counts[level - 1] += 1;
        }
    }

    let total: usize = counts.iter().sum();
    labels
        .iter()
        .zip(counts)
        .enumerate()
        .map(|(i, (&label, count))| PercentageBar {
            level: i + 1,
            label,
            count,
            percent: if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            },
        })
        .collect()
}
