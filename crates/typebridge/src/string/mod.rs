// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! String-backed coercion kind.
//!
//! Every database type has textual input and output routines, so rendering a
//! value to text and building a managed string from it works for any type.
//! That makes the String kind the universal fallback: its
//! [`can_replace_type`](TypeClass::can_replace_type) accepts every other kind.
//!
//! ```text
//! Datum --output routine--> db text --transcode--> UTF-8 --> managed String
//! object --toString--> UTF-8 --transcode--> db text --input routine--> Datum
//! ```

pub mod convert;

use crate::backend::{CatalogEntry, RoutineHandle};
use crate::config::{
    MANAGED_STRING_CLASS, OBJECT_CLASS_BINARY_NAME, STRING_CLASS_BINARY_NAME, STRING_SIGNATURE,
    TO_STRING_METHOD, TO_STRING_SIGNATURE, TYPMOD_UNSPECIFIED,
};
use crate::context::CallContext;
use crate::datum::Datum;
use crate::encoding::Encoding;
use crate::error::{CoerceError, Result};
use crate::runtime::{GlobalRef, LocalRef, ManagedRuntime, MethodId};
use crate::types::{Coercible, Oid, TypeClass, TypeDescriptor, TypeFactory, TypeRegistry};
use std::ffi::CString;
use std::sync::Arc;

/// Shared behavior of the String kind.
///
/// Holds global references to the managed `String` and `Object` classes and
/// the resolved `toString` method. Created once by
/// [`initialize`](Self::initialize) and handed back with
/// [`release`](Self::release).
#[derive(Debug)]
pub struct StringClass {
    string_class: GlobalRef,
    object_class: GlobalRef,
    to_string: MethodId,
}

impl StringClass {
    pub const NAME: &'static str = "type.String";

    /// Resolve the managed classes and methods the kind depends on.
    pub fn initialize(runtime: &mut dyn ManagedRuntime) -> Result<Self> {
        let object_class = global_class(runtime, OBJECT_CLASS_BINARY_NAME)?;
        let to_string = runtime.get_method_id(&object_class, TO_STRING_METHOD, TO_STRING_SIGNATURE);
        let Some(to_string) = to_string else {
            runtime.delete_global_ref(object_class);
            return Err(CoerceError::ClassNotFound("java/lang/Object.toString()"));
        };
        let string_class = match global_class(runtime, STRING_CLASS_BINARY_NAME) {
            Ok(class) => class,
            Err(e) => {
                runtime.delete_global_ref(object_class);
                return Err(e);
            }
        };

        log::debug!(
            "[StringClass] resolved {} and {}",
            OBJECT_CLASS_BINARY_NAME,
            STRING_CLASS_BINARY_NAME
        );
        Ok(Self {
            string_class,
            object_class,
            to_string,
        })
    }

    /// Hand the global references back to the runtime.
    pub fn release(self, runtime: &mut dyn ManagedRuntime) {
        runtime.delete_global_ref(self.string_class);
        runtime.delete_global_ref(self.object_class);
    }

    #[must_use]
    pub fn is_string(&self, runtime: &mut dyn ManagedRuntime, object: &LocalRef) -> bool {
        runtime.is_instance_of(object, &self.string_class)
    }

    /// Render any managed object as NUL-terminated text in `db_encoding`.
    ///
    /// Strings are read directly; other objects go through `toString`. A
    /// pending exception after `toString` fails the call; a `null` result
    /// yields `None`. Every local reference and pinned buffer obtained here is
    /// released before returning.
    pub fn to_database_cstring(
        &self,
        runtime: &mut dyn ManagedRuntime,
        db_encoding: Encoding,
        object: &LocalRef,
    ) -> Result<Option<CString>> {
        if self.is_string(runtime, object) {
            return convert::cstring_from_managed_string(runtime, db_encoding, object).map(Some);
        }

        let string = runtime.call_object_method(object, self.to_string);
        if runtime.exception_check() {
            if let Some(string) = string {
                runtime.delete_local_ref(string);
            }
            return Err(CoerceError::managed("toString"));
        }
        let Some(string) = string else {
            return Ok(None);
        };

        let text = convert::cstring_from_managed_string(runtime, db_encoding, &string);
        runtime.delete_local_ref(string);
        text.map(Some)
    }

    /// Build the String descriptor for `type_id` from its catalog entry.
    #[must_use]
    pub fn create_descriptor(
        self: &Arc<Self>,
        type_id: Oid,
        entry: &CatalogEntry,
    ) -> TypeDescriptor {
        let coercer = StringCoercer::new(Arc::clone(self), type_id, entry);
        TypeDescriptor::new(type_id, Arc::clone(self) as Arc<dyn TypeClass>, Box::new(coercer))
    }

    /// Factory producing String descriptors, for registration.
    #[must_use]
    pub fn factory(self: &Arc<Self>) -> TypeFactory {
        let class = Arc::clone(self);
        Arc::new(move |type_id, entry| Ok(class.create_descriptor(type_id, entry)))
    }
}

impl TypeClass for StringClass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn managed_type_name(&self) -> &'static str {
        MANAGED_STRING_CLASS
    }

    fn signature(&self) -> &'static str {
        STRING_SIGNATURE
    }

    /// Every database type can be coerced through its textual form.
    fn can_replace_type(&self, _other: &dyn TypeClass) -> bool {
        true
    }
}

/// Register `class` for the built-in text types, `extra` type ids, and the
/// managed string class (backed by `text`).
pub fn register_builtins(registry: &TypeRegistry, class: &Arc<StringClass>, extra: &[Oid]) {
    for type_id in crate::config::BUILTIN_TEXT_TYPES.iter().chain(extra) {
        registry.register_database_type(*type_id, class.factory());
    }
    registry.register_managed_type(MANAGED_STRING_CLASS, Oid::TEXT, class.factory());
}

/// Per-type state of the String kind: the type's text routines.
pub struct StringCoercer {
    class: Arc<StringClass>,
    type_id: Oid,
    output_routine: RoutineHandle,
    input_routine: RoutineHandle,
    element_type: Oid,
}

impl StringCoercer {
    #[must_use]
    pub fn new(class: Arc<StringClass>, type_id: Oid, entry: &CatalogEntry) -> Self {
        Self {
            class,
            type_id,
            output_routine: entry.output_routine,
            input_routine: entry.input_routine,
            element_type: entry.element_type,
        }
    }

    #[must_use]
    pub const fn element_type(&self) -> Oid {
        self.element_type
    }

    fn routine_failed(&self) -> impl FnOnce(crate::BackendError) -> CoerceError {
        let type_id = self.type_id;
        move |source| CoerceError::ConversionRoutine { type_id, source }
    }
}

impl Coercible for StringCoercer {
    fn coerce_datum(&self, cx: &mut CallContext<'_>, datum: &Datum) -> Result<Option<LocalRef>> {
        let rendered = cx
            .backend
            .call_output(self.output_routine, datum, self.element_type, TYPMOD_UNSPECIFIED)
            .map_err(self.routine_failed())?;
        let db_encoding = cx.backend.database_encoding();
        convert::managed_string_from_cstr(cx.runtime, db_encoding, &rendered)
    }

    fn coerce_object(&self, cx: &mut CallContext<'_>, object: &LocalRef) -> Result<Option<Datum>> {
        let db_encoding = cx.backend.database_encoding();
        let Some(text) = self.class.to_database_cstring(cx.runtime, db_encoding, object)? else {
            return Ok(None);
        };
        let datum = cx
            .backend
            .call_input(self.input_routine, &text, self.element_type, TYPMOD_UNSPECIFIED)
            .map_err(self.routine_failed())?;
        Ok(Some(datum))
    }
}

fn global_class(runtime: &mut dyn ManagedRuntime, name: &'static str) -> Result<GlobalRef> {
    let local = runtime.find_class(name).ok_or(CoerceError::ClassNotFound(name))?;
    let global = runtime.new_global_ref(&local);
    runtime.delete_local_ref(local);
    global.ok_or(CoerceError::ClassNotFound(name))
}
