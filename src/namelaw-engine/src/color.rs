// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;
use std::str::FromStr;

use namelaw_core::data_err;
use serde::{Serialize, Serializer};

use crate::common::{Error, ErrorCode, ErrorKind, Result};
use crate::datamodel::Dataset;

/// Tile color for states without data.
pub const NO_DATA: Rgb = Rgb::new(0xdd, 0xdd, 0xdd);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Straight per-channel interpolation, `t` in [0, 1].
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| -> u8 {
            let v = a as f64 + (b as f64 - a as f64) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    /// Accepts `#rrggbb` and `#rgb`.
    fn from_str(s: &str) -> Result<Rgb> {
        let bad = || Error::new(ErrorKind::Data, ErrorCode::BadColor, Some(s.to_owned()));
        let hex = s.strip_prefix('#').ok_or_else(bad)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let channel = |i: usize, w: usize| -> Result<u8> {
            let v = u8::from_str_radix(&hex[i * w..(i + 1) * w], 16).map_err(|_| bad())?;
            Ok(if w == 1 { v * 17 } else { v })
        };
        match hex.len() {
            6 => Ok(Rgb::new(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?)),
            3 => Ok(Rgb::new(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
            _ => Err(bad()),
        }
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Linear mapping from a numeric domain onto a two-color ramp.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColorScale {
    domain: [f64; 2],
    range: [Rgb; 2],
    fallback: Rgb,
}

impl ColorScale {
    pub fn new(domain: [f64; 2], range: [Rgb; 2]) -> Result<Self> {
        if !domain[0].is_finite() || !domain[1].is_finite() || domain[0] == domain[1] {
            return data_err!(BadScale, format!("color domain {domain:?}"));
        }
        Ok(ColorScale {
            domain,
            range,
            fallback: NO_DATA,
        })
    }

    pub fn with_fallback(mut self, fallback: Rgb) -> Self {
        self.fallback = fallback;
        self
    }

    /// Accent restriction levels 1..=3, light to dark blue.
    pub fn diacritics() -> Self {
        ColorScale {
            domain: [1.0, 3.0],
            range: [Rgb::new(0x3f, 0xa9, 0xf5), Rgb::new(0x14, 0x18, 0x3d)],
            fallback: NO_DATA,
        }
    }

    /// Length restriction levels 1..=5, red to near black.
    pub fn length() -> Self {
        ColorScale {
            domain: [1.0, 5.0],
            range: [Rgb::new(0xff, 0x00, 0x00), Rgb::new(0x30, 0x00, 0x00)],
            fallback: NO_DATA,
        }
    }

    pub fn for_dataset(dataset: Dataset) -> Self {
        match dataset {
            Dataset::Diacritics => Self::diacritics(),
            Dataset::Length => Self::length(),
        }
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn fallback(&self) -> Rgb {
        self.fallback
    }

    /// Whether `value` lies inside the domain, endpoints included.
    pub fn contains(&self, value: f64) -> bool {
        let (lo, hi) = if self.domain[0] <= self.domain[1] {
            (self.domain[0], self.domain[1])
        } else {
            (self.domain[1], self.domain[0])
        };
        value >= lo && value <= hi
    }

    /// Color for `value`.  Values past either end of the domain clamp to the
    /// endpoint color; zero, negative and non-finite values mean "no data".
    pub fn color_at(&self, value: f64) -> Rgb {
        if !value.is_finite() || value <= 0.0 {
            return self.fallback;
        }
        let t = (value - self.domain[0]) / (self.domain[1] - self.domain[0]);
        self.range[0].lerp(self.range[1], t.clamp(0.0, 1.0))
    }

    pub fn color_for(&self, value: Option<f64>) -> Rgb {
        value.map_or(self.fallback, |v| self.color_at(v))
    }
}
