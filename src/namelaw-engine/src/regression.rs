// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Least-squares trend lines for the correlation plot.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::common::{Error, ErrorCode, ErrorKind, Result};
use crate::points::{Category, DataPoint};

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct RegressionLine {
    pub slope: f64,
    pub intercept: f64,
}

/// A drawable piece of a regression line.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Segment {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl RegressionLine {
    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Both coefficients finite.  Fitting points that share a single x
    /// value yields infinite or NaN coefficients, which can't be drawn.
    pub fn is_drawable(&self) -> bool {
        self.slope.is_finite() && self.intercept.is_finite()
    }

    pub fn segment(&self, x0: f64, x1: f64) -> Segment {
        Segment {
            x0,
            y0: self.y_at(x0),
            x1,
            y1: self.y_at(x1),
        }
    }
}

/// Ordinary least squares over `(x, y)` pairs.  `None` with fewer than two
/// points; the coefficients are returned as computed otherwise, finite or
/// not.
pub fn fit(points: &[(f64, f64)]) -> Option<RegressionLine> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let (mut sx, mut sy, mut sxy, mut sxx) = (0.0, 0.0, 0.0, 0.0);
    for &(x, y) in points {
        sx += x;
        sy += y;
        sxy += x * y;
        sxx += x * x;
    }

    let slope = (n * sxy - sx * sy) / (n * sxx - sx * sx);
    let intercept = (sy - slope * sx) / n;

    Some(RegressionLine { slope, intercept })
}

/// `fit` narrowed to lines that can actually be drawn.
pub fn overlay(points: &[(f64, f64)]) -> Result<RegressionLine> {
    match fit(points) {
        Some(line) if line.is_drawable() => Ok(line),
        Some(_) => Err(Error::new(
            ErrorKind::Overlay,
            ErrorCode::RegressionUndefined,
            Some("x values are all identical".to_owned()),
        )),
        None => Err(Error::new(
            ErrorKind::Overlay,
            ErrorCode::RegressionUndefined,
            Some(format!("need at least 2 points, have {}", points.len())),
        )),
    }
}

/// One drawable line per category; categories without one are absent.
pub fn overlays_by_category(points: &[DataPoint]) -> BTreeMap<Category, RegressionLine> {
    let mut grouped: BTreeMap<Category, Vec<(f64, f64)>> = BTreeMap::new();
    for p in points {
        grouped.entry(p.category).or_default().push((p.x, p.y));
    }

    grouped
        .into_iter()
        .filter_map(|(category, xy)| overlay(&xy).ok().map(|line| (category, line)))
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn test_fit_too_few_points() {
        assert_eq!(None, fit(&[]));
        assert_eq!(None, fit(&[(3.0, 4.0)]));

        let err = overlay(&[(3.0, 4.0)]).unwrap_err();
        assert_eq!(ErrorCode::RegressionUndefined, err.code);
        assert_eq!(ErrorKind::Overlay, err.kind);
    }

    #[test]
    fn test_fit_identity() {
        let line = fit(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]).unwrap();
        assert!(approx_eq!(f64, 1.0, line.slope, epsilon = 1e-12));
        assert!(approx_eq!(f64, 0.0, line.intercept, epsilon = 1e-12));
    }

    #[test]
    fn test_fit_noisy() {
        // y = 2x + 1 with symmetric noise
        let points = [(0.0, 1.5), (1.0, 2.5), (2.0, 5.5), (3.0, 6.5)];
        let line = fit(&points).unwrap();
        assert!(approx_eq!(f64, 1.8, line.slope, epsilon = 1e-12));
        assert!(approx_eq!(f64, 1.3, line.intercept, epsilon = 1e-12));
        assert!(approx_eq!(f64, 10.3, line.y_at(5.0), epsilon = 1e-12));
    }

    #[test]
    fn test_vertical_points_not_drawable() {
        let points = [(2.0, 1.0), (2.0, 3.0), (2.0, 5.0)];
        let line = fit(&points).unwrap();
        assert!(!line.is_drawable());
        assert!(overlay(&points).is_err());
    }

    #[test]
    fn test_segment_endpoints() {
        let line = RegressionLine {
            slope: -0.5,
            intercept: 4.0,
        };
        let seg = line.segment(0.0, 8.0);
        assert_eq!(4.0, seg.y0);
        assert_eq!(0.0, seg.y1);
    }

    #[test]
    fn test_overlays_by_category() {
        let points = vec![
            DataPoint::new("AA", 10.0, 1.0, Category::A),
            DataPoint::new("BB", 20.0, 2.0, Category::A),
            DataPoint::new("CC", 30.0, 3.0, Category::A),
            // single point: no line
            DataPoint::new("DD", 40.0, 2.0, Category::B),
        ];
        let lines = overlays_by_category(&points);
        assert_eq!(1, lines.len());
        let a = lines[&Category::A];
        assert!(approx_eq!(f64, 0.1, a.slope, epsilon = 1e-12));
        assert!(approx_eq!(f64, 0.0, a.intercept, epsilon = 1e-12));
        assert!(!lines.contains_key(&Category::B));
    }
}
