// Copyright 2026 The Noesis Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;
use std::{error, result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoError, // will never be produced
    DoesNotExist,
    MissingId,
    DuplicateNode,
    DanglingEdge,
    DivergentSimulation,
    InvalidOperation,
    Serialization,
    Generic,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorCode::*;
        let name = match self {
            NoError => "no_error",
            DoesNotExist => "does_not_exist",
            MissingId => "missing_id",
            DuplicateNode => "duplicate_node",
            DanglingEdge => "dangling_edge",
            DivergentSimulation => "divergent_simulation",
            InvalidOperation => "invalid_operation",
            Serialization => "serialization",
            Generic => "generic",
        };

        write!(f, "{name}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Adapter,
    Layout,
    Simulation,
    Session,
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
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.kind {
            ErrorKind::Adapter => "adapter",
            ErrorKind::Layout => "layout",
            ErrorKind::Simulation => "simulation",
            ErrorKind::Session => "session",
        };
        match &self.details {
            Some(details) => write!(f, "{}:{} -- {}", kind, self.code, details),
            None => write!(f, "{}:{}", kind, self.code),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

/// Shorthand for the error-returning no-op cases (unknown node ids and the
/// like) that must never crash a layout.
#[macro_export]
macro_rules! op_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(
            ErrorKind::Session,
            ErrorCode::$code,
            Some($str),
        ))
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::new(ErrorKind::Adapter, ErrorCode::MissingId, None);
        assert_eq!(format!("{err}"), "adapter:missing_id");

        let err = Error::new(
            ErrorKind::Simulation,
            ErrorCode::DivergentSimulation,
            Some("tick budget exhausted".to_string()),
        );
        assert_eq!(
            format!("{err}"),
            "simulation:divergent_simulation -- tick budget exhausted"
        );
    }

    #[test]
    fn test_op_err_macro() {
        let result: Result<()> = op_err!(InvalidOperation, "drag on unknown node".to_string());
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Session);
        assert_eq!(err.code, ErrorCode::InvalidOperation);
    }
}
