// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::ops::{Add, AddAssign, Mul, Sub};

use serde::Serialize;

use super::config::Margins;

/// 2D position/vector used throughout the layout pipeline.
#[derive(Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }
}

impl Add for Position {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl AddAssign for Position {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Position {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f64> for Position {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// Drawing area in pixels.  The plot itself occupies the area inside the
/// margins; labels may use the full width and height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
}

impl Viewport {
    pub fn new(width: f64, height: f64, margins: Margins) -> Self {
        Viewport {
            width,
            height,
            margins,
        }
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    /// Pixel span of the x axis, left to right.
    pub fn x_range(&self) -> [f64; 2] {
        [self.margins.left, self.width - self.margins.right]
    }

    /// Pixel span of the y axis, bottom to top (SVG y grows downward).
    pub fn y_range(&self) -> [f64; 2] {
        [self.height - self.margins.bottom, self.margins.top]
    }

    /// Both axis spans are positive, i.e. the margins leave room to plot.
    pub fn has_plot_area(&self) -> bool {
        let [left, right] = self.x_range();
        let [bottom, top] = self.y_range();
        right > left && bottom > top
    }

    /// Clamp `pos` so a circle of `radius` around it stays on screen.
    pub fn clamp(&self, pos: Position, radius: f64) -> Position {
        let clamp = |v: f64, hi: f64| v.max(radius).min((hi - radius).max(radius));
        Position::new(clamp(pos.x, self.width), clamp(pos.y, self.height))
    }

    pub fn contains(&self, pos: Position, radius: f64) -> bool {
        pos.x >= radius
            && pos.x <= self.width - radius
            && pos.y >= radius
            && pos.y <= self.height - radius
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Fixed at the data point's scaled coordinates.
    Anchor,
    /// Free-floating text label.
    Label,
}

/// Arena record for one simulation node.  Position and velocity live in
/// parallel arrays owned by the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    /// Index of the data point this node was built from.
    pub datum: usize,
}

impl Node {
    pub fn is_fixed(&self) -> bool {
        self.kind == NodeKind::Anchor
    }
}

/// Spring between a label and its anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub anchor: usize,
    pub label: usize,
    pub distance: f64,
    pub strength: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ops() {
        let a = Position::new(1.0, 2.0);
        let b = Position::new(4.0, 6.0);
        assert_eq!(Position::new(5.0, 8.0), a + b);
        assert_eq!(Position::new(3.0, 4.0), b - a);
        assert_eq!(Position::new(2.0, 4.0), a * 2.0);
        assert_eq!(5.0, a.distance(b));

        let mut c = a;
        c += b;
        assert_eq!(a + b, c);
    }

    #[test]
    fn test_viewport_ranges() {
        let vp = Viewport::new(600.0, 400.0, Margins::default());
        assert_eq!([50.0, 570.0], vp.x_range());
        assert_eq!([360.0, 20.0], vp.y_range());
        assert_eq!(Position::new(300.0, 200.0), vp.center());
        assert!(vp.has_plot_area());
        assert!(!Viewport::new(80.0, 400.0, Margins::default()).has_plot_area());
        assert!(!Viewport::new(600.0, f64::NAN, Margins::default()).has_plot_area());
    }

    #[test]
    fn test_viewport_clamp() {
        let vp = Viewport::new(100.0, 50.0, Margins::default());
        assert_eq!(Position::new(5.0, 45.0), vp.clamp(Position::new(-20.0, 90.0), 5.0));
        assert_eq!(Position::new(30.0, 20.0), vp.clamp(Position::new(30.0, 20.0), 5.0));
        assert!(vp.contains(vp.clamp(Position::new(1e9, -1e9), 5.0), 5.0));
    }
}
