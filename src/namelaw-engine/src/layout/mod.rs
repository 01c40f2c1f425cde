// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

pub mod chart;
pub mod config;
pub mod force;
pub mod graph;
pub mod scale;
pub mod simulation;

pub use self::chart::CorrelationChart;
pub use self::config::{LabelLayoutConfig, Margins};
pub use self::graph::{NodeKind, Position, Viewport};
pub use self::scale::LinearScale;
pub use self::simulation::{
    LabelSimulation, NodeSnapshot, Snapshot, StopHandle, Subscriber, TickOutcome,
};

use crate::common::Result;
use crate::points::DataPoint;

/// Lay out labels for `points` on a `width` x `height` chart, running the
/// simulation to convergence (or `config.max_ticks`).
pub fn layout_labels(
    points: &[DataPoint],
    width: f64,
    height: f64,
    config: LabelLayoutConfig,
) -> Result<Snapshot> {
    let mut chart = CorrelationChart::new(width, height, config);
    let simulation = chart.render(points)?;
    Ok(simulation.run())
}
