// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-database-type coercion descriptor.

use super::class::{Coercible, TypeClass};
use super::Oid;
use crate::context::CallContext;
use crate::datum::Datum;
use crate::error::Result;
use crate::runtime::LocalRef;
use std::fmt;
use std::sync::Arc;

/// Coercion descriptor for one database type.
///
/// Built by a [`TypeFactory`](super::TypeFactory) and stored in the
/// [`TypeCache`](super::TypeCache); one instance exists per type id and is
/// shared by `Arc`. Immutable after construction.
pub struct TypeDescriptor {
    type_id: Oid,
    class: Arc<dyn TypeClass>,
    coercer: Box<dyn Coercible>,
}

impl TypeDescriptor {
    #[must_use]
    pub fn new(type_id: Oid, class: Arc<dyn TypeClass>, coercer: Box<dyn Coercible>) -> Self {
        Self {
            type_id,
            class,
            coercer,
        }
    }

    #[must_use]
    pub const fn type_id(&self) -> Oid {
        self.type_id
    }

    #[must_use]
    pub fn class(&self) -> &dyn TypeClass {
        self.class.as_ref()
    }

    /// Whether this descriptor may stand in for one of `other`'s kind.
    #[must_use]
    pub fn can_replace_type(&self, other: &TypeDescriptor) -> bool {
        self.class.can_replace_type(other.class())
    }

    /// Convert a native value into a managed object.
    ///
    /// `None` in gives `None` out without calling the kind.
    pub fn coerce_datum(
        &self,
        cx: &mut CallContext<'_>,
        datum: Option<&Datum>,
    ) -> Result<Option<LocalRef>> {
        match datum {
            Some(datum) => self.coercer.coerce_datum(cx, datum),
            None => Ok(None),
        }
    }

    /// Convert a managed object into a native value.
    ///
    /// `None` in gives `None` out without calling the kind.
    pub fn coerce_object(
        &self,
        cx: &mut CallContext<'_>,
        object: Option<&LocalRef>,
    ) -> Result<Option<Datum>> {
        match object {
            Some(object) => self.coercer.coerce_object(cx, object),
            None => Ok(None),
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_id", &self.type_id)
            .field("class", &self.class.name())
            .finish_non_exhaustive()
    }
}
