// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::backend::Backend;
use crate::runtime::ManagedRuntime;

/// Collaborators available to one coercion call.
///
/// Built by the call-dispatch bridge for the duration of a single call and
/// dropped afterwards; descriptors never keep it.
pub struct CallContext<'a> {
    pub backend: &'a mut dyn Backend,
    pub runtime: &'a mut dyn ManagedRuntime,
}

impl<'a> CallContext<'a> {
    pub fn new(backend: &'a mut dyn Backend, runtime: &'a mut dyn ManagedRuntime) -> Self {
        Self { backend, runtime }
    }
}
