// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

#![forbid(unsafe_code)]

pub use namelaw_core as core;
pub use namelaw_core::{common, datamodel};

pub mod color;
pub mod grid;
pub mod layout;
pub mod points;
pub mod regression;
pub mod summary;
pub mod table;
pub mod validate;

#[cfg(test)]
mod validate_proptest;

pub use self::common::{Error, ErrorCode, ErrorKind, Result};
pub use self::points::{Category, DataPoint};
pub use self::regression::{RegressionLine, fit};
pub use self::validate::{Reason, Status, Verdict, validate};
