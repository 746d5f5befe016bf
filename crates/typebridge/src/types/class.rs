// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Coercion kinds.
//!
//! A [`TypeClass`] is the shared, stateless behavior of one kind of coercion
//! (String, numeric, array, ...). A [`Coercible`] is the per-database-type
//! state of that kind, built once by a factory and owned by a
//! [`TypeDescriptor`](super::TypeDescriptor). New kinds implement both traits;
//! nothing branches on a type tag.

use crate::context::CallContext;
use crate::datum::Datum;
use crate::error::Result;
use crate::runtime::LocalRef;

/// Shared behavior descriptor of a coercion kind.
pub trait TypeClass: Send + Sync {
    /// Kind name, e.g. `type.String`.
    fn name(&self) -> &'static str;

    /// Fully-qualified managed class produced by this kind.
    fn managed_type_name(&self) -> &'static str;

    /// Wire-format signature of the managed class (`Ljava/lang/String;`).
    fn signature(&self) -> &'static str;

    /// Whether a descriptor of this kind may stand in where `other` is expected.
    ///
    /// Used by overload resolution. The default only accepts the same kind.
    fn can_replace_type(&self, other: &dyn TypeClass) -> bool {
        self.name() == other.name()
    }
}

/// Per-type coercion state of a kind.
///
/// Both operations receive a present value; "no value" is handled by the
/// owning descriptor before dispatch.
pub trait Coercible: Send + Sync {
    /// Native value -> managed object. `None` means "no object".
    fn coerce_datum(&self, cx: &mut CallContext<'_>, datum: &Datum) -> Result<Option<LocalRef>>;

    /// Managed object -> native value. `None` means "no value".
    fn coerce_object(&self, cx: &mut CallContext<'_>, object: &LocalRef) -> Result<Option<Datum>>;
}
