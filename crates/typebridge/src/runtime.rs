// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Managed-runtime collaborator.
//!
//! Mirrors the native interface of a garbage-collected runtime: objects are
//! reached through local or global references, strings are imported and
//! exported as UTF-8, and any call may leave an exception pending that must be
//! polled with [`ManagedRuntime::exception_check`] right after the call.
//!
//! Reference handles are neither `Copy` nor `Clone`: releasing a
//! handle consumes it, so a second release does not type-check.

use std::ffi::{CStr, CString};
use std::num::NonZeroU64;

/// Reference valid for the current native frame.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct LocalRef(NonZeroU64);

/// Reference valid until explicitly deleted.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct GlobalRef(NonZeroU64);

/// Resolved instance method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId(NonZeroU64);

macro_rules! raw_handle {
    ($ty:ident) => {
        impl $ty {
            /// Wrap a raw handle value issued by the runtime.
            #[must_use]
            pub const fn from_raw(raw: NonZeroU64) -> Self {
                Self(raw)
            }

            #[must_use]
            pub const fn as_raw(&self) -> NonZeroU64 {
                self.0
            }
        }
    };
}

raw_handle!(LocalRef);
raw_handle!(GlobalRef);
raw_handle!(MethodId);

/// Pinned UTF-8 view of a managed string.
///
/// Must be handed back through [`ManagedRuntime::release_string_utf_chars`].
#[derive(Debug)]
pub struct Utf8Chars {
    token: u64,
    chars: CString,
}

impl Utf8Chars {
    #[must_use]
    pub fn new(token: u64, chars: CString) -> Self {
        Self { token, chars }
    }

    /// Runtime-specific pin token.
    #[must_use]
    pub const fn token(&self) -> u64 {
        self.token
    }

    #[must_use]
    pub fn as_cstr(&self) -> &CStr {
        &self.chars
    }
}

/// Native interface of the embedded managed runtime.
///
/// Methods returning `Option` yield `None` when the call failed; an exception
/// is then pending and [`exception_check`](Self::exception_check) reports it.
pub trait ManagedRuntime {
    /// Look up a class by its binary name (`java/lang/String`).
    fn find_class(&mut self, name: &str) -> Option<LocalRef>;

    fn get_method_id(&mut self, class: &GlobalRef, name: &str, signature: &str)
        -> Option<MethodId>;

    fn new_global_ref(&mut self, object: &LocalRef) -> Option<GlobalRef>;

    fn delete_global_ref(&mut self, global: GlobalRef);

    fn delete_local_ref(&mut self, local: LocalRef);

    fn is_instance_of(&mut self, object: &LocalRef, class: &GlobalRef) -> bool;

    /// Invoke a zero-argument method returning an object. `None` covers both
    /// a `null` result and a failed call; tell them apart with
    /// [`exception_check`](Self::exception_check).
    fn call_object_method(&mut self, object: &LocalRef, method: MethodId) -> Option<LocalRef>;

    /// True when an exception is pending. Does not clear it.
    fn exception_check(&mut self) -> bool;

    /// Create a managed string from UTF-8.
    fn new_string_utf(&mut self, utf8: &CStr) -> Option<LocalRef>;

    /// Pin the UTF-8 content of a managed string.
    fn get_string_utf_chars(&mut self, string: &LocalRef) -> Option<Utf8Chars>;

    fn release_string_utf_chars(&mut self, string: &LocalRef, chars: Utf8Chars);
}
