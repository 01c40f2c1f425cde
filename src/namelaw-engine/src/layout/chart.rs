// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::BTreeMap;

use namelaw_core::layout_err;

use super::config::LabelLayoutConfig;
use super::graph::Viewport;
use super::scale::LinearScale;
use super::simulation::LabelSimulation;
use crate::common::Result;
use crate::points::{Category, DataPoint};
use crate::regression::{RegressionLine, Segment, overlays_by_category};

/// Scatter plot of length limit against accent restrictions, with one
/// floating label per state and a trend line per category.
///
/// A chart drives at most one simulation; rendering new data stops the
/// previous run before the next one is built.
pub struct CorrelationChart {
    viewport: Viewport,
    config: LabelLayoutConfig,
    simulation: Option<LabelSimulation>,
    scales: Option<(LinearScale, LinearScale)>,
    overlays: BTreeMap<Category, RegressionLine>,
}

impl CorrelationChart {
    pub fn new(width: f64, height: f64, config: LabelLayoutConfig) -> Self {
        CorrelationChart {
            viewport: Viewport::new(width, height, config.margins),
            config,
            simulation: None,
            scales: None,
            overlays: BTreeMap::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Start a fresh simulation for `points`.  Axes run from zero to the
    /// largest value on each axis.
    pub fn render(&mut self, points: &[DataPoint]) -> Result<&mut LabelSimulation> {
        self.stop();
        self.simulation = None;
        self.scales = None;
        self.overlays.clear();

        if points.is_empty() {
            return layout_err!(DegenerateDataset, "no data points to plot".to_owned());
        }
        if !self.viewport.has_plot_area() {
            return layout_err!(
                BadConfig,
                format!(
                    "{}x{} leaves no room inside the margins",
                    self.viewport.width, self.viewport.height
                )
            );
        }

        let x_scale = LinearScale::from_zero(points.iter().map(|p| p.x), self.viewport.x_range())?;
        let y_scale = LinearScale::from_zero(points.iter().map(|p| p.y), self.viewport.y_range())?;
        let simulation = LabelSimulation::new(
            points,
            &x_scale,
            &y_scale,
            self.viewport,
            self.config.clone(),
        )?;

        self.overlays = overlays_by_category(points);
        self.scales = Some((x_scale, y_scale));
        Ok(self.simulation.insert(simulation))
    }

    /// Stop the current simulation, if any.
    pub fn stop(&self) {
        if let Some(simulation) = &self.simulation {
            simulation.stop();
        }
    }

    pub fn simulation(&self) -> Option<&LabelSimulation> {
        self.simulation.as_ref()
    }

    pub fn simulation_mut(&mut self) -> Option<&mut LabelSimulation> {
        self.simulation.as_mut()
    }

    pub fn scales(&self) -> Option<&(LinearScale, LinearScale)> {
        self.scales.as_ref()
    }

    /// Drawable trend lines in data coordinates.
    pub fn overlays(&self) -> &BTreeMap<Category, RegressionLine> {
        &self.overlays
    }

    /// Trend lines across the full x axis, in pixels.
    pub fn overlay_segments(&self) -> BTreeMap<Category, Segment> {
        let Some((x_scale, y_scale)) = &self.scales else {
            return BTreeMap::new();
        };
        let [x0, x1] = x_scale.domain();
        self.overlays
            .iter()
            .map(|(&category, line)| {
                let data = line.segment(x0, x1);
                let pixels = Segment {
                    x0: x_scale.map(data.x0),
                    y0: y_scale.map(data.y0),
                    x1: x_scale.map(data.x1),
                    y1: y_scale.map(data.y1),
                };
                (category, pixels)
            })
            .collect()
    }
}
