// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # typebridge - Datum <-> managed object coercion
//!
//! Converts native database values into objects of an embedded managed runtime
//! and back, for a registerable set of database types. Each database type gets
//! one cached [`TypeDescriptor`]; the String kind is the universal fallback and
//! routes values through the type's textual input/output routines.
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                call-dispatch bridge (host extension)                |
//! +---------------------------------------------------------------------+
//! |  TypeSystem  ->  TypeCache (Oid -> Arc<TypeDescriptor>)             |
//! |              ->  TypeRegistry (Oid / class name -> TypeFactory)     |
//! +---------------------------------------------------------------------+
//! |  TypeDescriptor = Arc<dyn TypeClass> + Box<dyn Coercible>           |
//! |  StringClass / StringCoercer  ->  encoding::transcode               |
//! +---------------------------------------------------------------------+
//! |  Backend (catalog, routines)   |   ManagedRuntime (refs, strings)   |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use typebridge::{config::BridgeConfig, CallContext, Oid, TypeSystem};
//!
//! let system = TypeSystem::initialize(BridgeConfig::default(), &mut runtime)?;
//! let text = system.resolve_type(&backend, Oid::TEXT)?;
//!
//! let mut cx = CallContext::new(&mut backend, &mut runtime);
//! let object = text.coerce_datum(&mut cx, Some(&datum))?;
//! let back = text.coerce_object(&mut cx, object.as_ref())?;
//! ```

/// Database-side collaborator (catalog, input/output routines, encoding).
pub mod backend;
/// Static constants and runtime configuration.
pub mod config;
/// Per-call bundle of the two collaborators.
pub mod context;
/// Native database value representation.
pub mod datum;
/// Encoding identifiers and the byte transcoder.
pub mod encoding;
/// Error types shared by every module.
pub mod error;
/// `env_logger` initialization helpers.
pub mod logging;
/// Managed-runtime collaborator (references, strings, method calls).
pub mod runtime;
/// String-backed coercion kind and managed-string helpers.
pub mod string;
/// Type abstraction, registry, cache and the process-scoped context.
pub mod types;

pub use backend::{Backend, BackendError, CatalogEntry, RoutineHandle};
pub use context::CallContext;
pub use datum::Datum;
pub use encoding::{Encoding, EncodingError, Transcoded};
pub use error::{CoerceError, Result};
pub use runtime::{GlobalRef, LocalRef, ManagedRuntime, MethodId, Utf8Chars};
pub use string::{StringClass, StringCoercer};
pub use types::{
    Coercible, LookupStats, ManagedBinding, Oid, TypeCache, TypeClass, TypeDescriptor,
    TypeFactory, TypeRegistry, TypeSystem,
};
