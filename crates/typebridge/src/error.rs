// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Errors returned by type resolution and coercion.
//!
//! Every failure aborts the single in-flight operation and is reported to the
//! immediate caller. Nothing in this crate retries.

use crate::backend::BackendError;
use crate::encoding::EncodingError;
use crate::types::Oid;

/// Errors produced while resolving or coercing values.
#[derive(Debug, thiserror::Error)]
pub enum CoerceError {
    // ========================================================================
    // Resolution Errors
    // ========================================================================
    /// The type identifier does not resolve to a catalog entry.
    #[error("cache lookup failed for type {type_id}")]
    CatalogLookup {
        type_id: Oid,
        #[source]
        source: BackendError,
    },
    /// No factory is registered for the type and fallback is disabled.
    #[error("no coercion registered for type {0}")]
    NoCoercion(Oid),
    /// No factory is registered for the managed class name.
    #[error("no coercion registered for managed class {0}")]
    UnknownManagedClass(String),
    /// A managed class or method needed at initialization could not be resolved.
    #[error("managed runtime could not resolve {0}")]
    ClassNotFound(&'static str),

    // ========================================================================
    // Coercion Errors
    // ========================================================================
    /// The type's input or output routine raised an error.
    #[error("conversion routine failed for type {type_id}")]
    ConversionRoutine {
        type_id: Oid,
        #[source]
        source: BackendError,
    },
    /// The managed runtime left an exception pending.
    #[error("managed runtime raised an exception during {operation}")]
    ManagedRuntime { operation: &'static str },
    /// Bytes could not be represented in the target encoding.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration is invalid or could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CoerceError {
    /// Shorthand for a pending managed exception.
    pub(crate) const fn managed(operation: &'static str) -> Self {
        Self::ManagedRuntime { operation }
    }
}

/// Convenient alias for results using [`CoerceError`].
pub type Result<T> = core::result::Result<T, CoerceError>;
