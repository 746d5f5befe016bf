// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Database-side collaborator.
//!
//! The host database owns the type catalog, the per-type textual input/output
//! routines and the server encoding. This crate only consumes them through
//! [`Backend`].

use crate::datum::Datum;
use crate::encoding::Encoding;
use crate::types::Oid;
use std::ffi::{CStr, CString};
use std::fmt;

/// Resolved handle to a catalog function (the database's function-call info).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoutineHandle(pub Oid);

impl RoutineHandle {
    #[must_use]
    pub const fn oid(self) -> Oid {
        self.0
    }
}

/// Slice of a type's catalog row needed to coerce its values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Type this row describes.
    pub type_id: Oid,
    /// Catalog type name, for diagnostics.
    pub name: String,
    /// Datum -> NUL-terminated text.
    pub output_routine: RoutineHandle,
    /// NUL-terminated text -> Datum.
    pub input_routine: RoutineHandle,
    /// Element type passed to the routines (`Oid::INVALID` for scalars).
    pub element_type: Oid,
}

/// Error raised by the database (catalog miss, routine failure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    pub message: String,
    /// Five-character SQLSTATE when the database supplied one.
    pub sqlstate: Option<String>,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            sqlstate: None,
        }
    }

    #[must_use]
    pub fn with_sqlstate(mut self, sqlstate: impl Into<String>) -> Self {
        self.sqlstate = Some(sqlstate.into());
        self
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sqlstate {
            Some(code) => write!(f, "{} (SQLSTATE {})", self.message, code),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for BackendError {}

/// Services the host database provides to the bridge.
///
/// Calls are synchronous and may fail with the database's own error; this
/// crate propagates such failures unchanged.
pub trait Backend {
    /// Server encoding of text handed to and returned by the routines.
    fn database_encoding(&self) -> Encoding;

    /// Fetch the catalog row for `type_id`. Fails when the id is unknown.
    fn lookup_type(&self, type_id: Oid) -> Result<CatalogEntry, BackendError>;

    /// Invoke an output routine: `(value, element_type, typmod) -> text`.
    fn call_output(
        &mut self,
        routine: RoutineHandle,
        value: &Datum,
        element_type: Oid,
        typmod: i32,
    ) -> Result<CString, BackendError>;

    /// Invoke an input routine: `(text, element_type, typmod) -> value`.
    fn call_input(
        &mut self,
        routine: RoutineHandle,
        text: &CStr,
        element_type: Oid,
        typmod: i32,
    ) -> Result<Datum, BackendError>;
}
