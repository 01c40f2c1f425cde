// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;
use std::{error, result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoError,      // will never be produced
    UnknownState, // the named state isn't in the rule table
    BadPattern,
    BadDataset,
    BadColor,
    BadScale,
    BadConfig,
    RegressionUndefined,
    DegenerateDataset,
    Generic,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorCode::*;
        let name = match self {
            NoError => "no_error",
            UnknownState => "unknown_state",
            BadPattern => "bad_pattern",
            BadDataset => "bad_dataset",
            BadColor => "bad_color",
            BadScale => "bad_scale",
            BadConfig => "bad_config",
            RegressionUndefined => "regression_undefined",
            DegenerateDataset => "degenerate_dataset",
            Generic => "generic",
        };

        write!(f, "{name}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Data,
    Validation,
    Layout,
    Overlay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub details: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, code: ErrorCode, details: Option<String>) -> Self {
        Error {
            kind,
            code,
            details,
        }
    }

    pub fn get_details(&self) -> Option<String> {
        self.details.clone()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.kind {
            ErrorKind::Data => "DataError",
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Layout => "LayoutError",
            ErrorKind::Overlay => "OverlayError",
        };
        match self.details {
            Some(ref details) => write!(f, "{}{{{}: {}}}", kind, self.code, details),
            None => write!(f, "{}{{{}}}", kind, self.code),
        }
    }
}

impl error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Data,
            code: ErrorCode::BadDataset,
            details: Some(err.to_string()),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

#[macro_export]
macro_rules! data_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Data, ErrorCode::$code, Some($str)))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Data, ErrorCode::$code, None))
    }};
}

#[macro_export]
macro_rules! layout_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Layout, ErrorCode::$code, Some($str)))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Layout, ErrorCode::$code, None))
    }};
}

#[test]
fn test_error_display() {
    let err = Error::new(
        ErrorKind::Validation,
        ErrorCode::UnknownState,
        Some("Atlantis".to_owned()),
    );
    assert_eq!("ValidationError{unknown_state: Atlantis}", format!("{err}"));

    let err = Error::new(ErrorKind::Layout, ErrorCode::DegenerateDataset, None);
    assert_eq!("LayoutError{degenerate_dataset}", format!("{err}"));
}

#[test]
fn test_macros_build_errors() {
    let r: Result<()> = data_err!(BadColor, "#12".to_owned());
    let err = r.unwrap_err();
    assert_eq!(ErrorKind::Data, err.kind);
    assert_eq!(ErrorCode::BadColor, err.code);
    assert_eq!(Some("#12".to_owned()), err.get_details());

    let r: Result<()> = layout_err!(DegenerateDataset);
    assert_eq!(ErrorCode::DegenerateDataset, r.unwrap_err().code);
}
