// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use namelaw_core::layout_err;

use crate::common::Result;

/// Affine map from a data domain to a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Result<Self> {
        let finite = domain.iter().chain(range.iter()).all(|v| v.is_finite());
        if !finite || domain[0] == domain[1] {
            return layout_err!(BadScale, format!("domain {domain:?} range {range:?}"));
        }
        Ok(LinearScale { domain, range })
    }

    /// Scale with domain `[0, max]` over `values`.
    pub fn from_zero(values: impl IntoIterator<Item = f64>, range: [f64; 2]) -> Result<Self> {
        let max = values.into_iter().fold(0.0_f64, f64::max);
        Self::new([0.0, max], range)
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    pub fn map(&self, value: f64) -> f64 {
        let t = (value - self.domain[0]) / (self.domain[1] - self.domain[0]);
        self.range[0] + t * (self.range[1] - self.range[0])
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        let t = (pixel - self.range[0]) / (self.range[1] - self.range[0]);
        self.domain[0] + t * (self.domain[1] - self.domain[0])
    }
}
