// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use namelaw_core::layout_err;
use serde::{Deserialize, Serialize};

use crate::common::Result;

/// Space reserved around the plot area for axes and titles, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 30.0,
            bottom: 40.0,
            left: 50.0,
        }
    }
}

/// Label layout configuration.  Defaults follow d3-force's.
///
/// Every field can be overridden from JSON; missing fields keep their
/// defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelLayoutConfig {
    // Forces
    /// Many-body strength; negative values repel.
    pub charge: f64,
    /// Floor on the distance used by the many-body force, so coincident
    /// nodes don't produce unbounded pushes.
    pub distance_min: f64,
    /// Rest length of the tether between a label and its anchor.
    pub link_distance: f64,
    /// Tether stiffness, 0.0-1.0.
    pub link_strength: f64,
    /// How strongly the node set's centroid is pulled to the viewport center.
    pub center_strength: f64,

    // Integration and cooling
    /// Fraction of velocity lost per tick (friction).
    pub velocity_decay: f64,
    /// Starting alpha (simulation temperature).
    pub alpha: f64,
    /// Alpha below which the run counts as converged.
    pub alpha_min: f64,
    /// Per-tick fraction by which alpha approaches `alpha_target`.
    pub alpha_decay: f64,
    pub alpha_target: f64,
    /// Upper bound on ticks for a synchronous run.
    pub max_ticks: usize,

    // Geometry
    /// Label radius used when clamping to the viewport.
    pub node_radius: f64,
    pub margins: Margins,

    /// Seed for the jitter that separates coincident nodes.
    pub seed: u64,
}

impl Default for LabelLayoutConfig {
    fn default() -> Self {
        Self {
            charge: -30.0,
            distance_min: 1.0,
            link_distance: 10.0,
            link_strength: 1.0,
            center_strength: 0.05,
            velocity_decay: 0.4,
            alpha: 1.0,
            alpha_min: 0.001,
            alpha_decay: 1.0 - 0.001_f64.powf(1.0 / 300.0),
            alpha_target: 0.0,
            max_ticks: 1000,
            node_radius: 5.0,
            margins: Margins::default(),
            seed: 42,
        }
    }
}

impl LabelLayoutConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LabelLayoutConfig = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Reject settings that would make the simulation diverge or never cool.
    pub fn check(&self) -> Result<()> {
        let unit = |v: f64| (0.0..=1.0).contains(&v);
        if !unit(self.velocity_decay) {
            return layout_err!(BadConfig, format!("velocity_decay {}", self.velocity_decay));
        }
        if !unit(self.alpha_decay) {
            return layout_err!(BadConfig, format!("alpha_decay {}", self.alpha_decay));
        }
        if !unit(self.link_strength) {
            return layout_err!(BadConfig, format!("link_strength {}", self.link_strength));
        }
        if self.node_radius.is_nan()
            || self.node_radius < 0.0
            || self.distance_min.is_nan()
            || self.distance_min <= 0.0
        {
            return layout_err!(BadConfig, "node_radius and distance_min".to_owned());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LabelLayoutConfig::default();

        // Forces
        assert!((config.charge - -30.0).abs() < f64::EPSILON);
        assert!((config.distance_min - 1.0).abs() < f64::EPSILON);
        assert!((config.link_distance - 10.0).abs() < f64::EPSILON);
        assert!((config.link_strength - 1.0).abs() < f64::EPSILON);
        assert!((config.center_strength - 0.05).abs() < f64::EPSILON);

        // Cooling: 300 ticks take alpha from 1 down to alpha_min
        assert!((config.velocity_decay - 0.4).abs() < f64::EPSILON);
        let after_300 = (1.0 - config.alpha_decay).powi(300);
        assert!((after_300 - config.alpha_min).abs() < 1e-9);
        assert_eq!(config.max_ticks, 1000);

        // Geometry
        assert!((config.node_radius - 5.0).abs() < f64::EPSILON);
        assert!((config.margins.left - 50.0).abs() < f64::EPSILON);
        assert!((config.margins.bottom - 40.0).abs() < f64::EPSILON);

        assert_eq!(config.seed, 42);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = LabelLayoutConfig::from_json(
            r#"{"charge": -60, "margins": {"left": 10}, "seed": 7}"#,
        )
        .unwrap();
        assert!((config.charge - -60.0).abs() < f64::EPSILON);
        assert_eq!(config.seed, 7);
        assert!((config.margins.left - 10.0).abs() < f64::EPSILON);
        // untouched fields keep their defaults
        assert!((config.margins.top - 20.0).abs() < f64::EPSILON);
        assert!((config.link_distance - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bad_config_rejected() {
        let err = LabelLayoutConfig::from_json(r#"{"velocity_decay": 1.5}"#).unwrap_err();
        assert_eq!(crate::ErrorCode::BadConfig, err.code);

        let err = LabelLayoutConfig::from_json(r#"{"charge": "lots"}"#).unwrap_err();
        assert_eq!(crate::ErrorCode::BadDataset, err.code);

        let config = LabelLayoutConfig {
            distance_min: 0.0,
            ..LabelLayoutConfig::default()
        };
        assert!(config.check().is_err());
    }
}
