// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Factory registry keyed by database type id and by managed class name.
//!
//! Entries are registered once at startup and never removed. Registering an
//! existing key replaces its factory; descriptors already cached are not
//! affected. The registry itself has no fallback: choosing the String kind
//! for unregistered types is the [`TypeSystem`](super::TypeSystem)'s policy.

use super::{Oid, TypeDescriptor};
use crate::backend::CatalogEntry;
use crate::error::Result;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

/// Builds the descriptor for a database type from its catalog entry.
pub type TypeFactory = Arc<dyn Fn(Oid, &CatalogEntry) -> Result<TypeDescriptor> + Send + Sync>;

/// Managed class registration: the database type backing the class and the
/// factory that builds its descriptor.
#[derive(Clone)]
pub struct ManagedBinding {
    pub type_id: Oid,
    pub factory: TypeFactory,
}

impl fmt::Debug for ManagedBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedBinding")
            .field("type_id", &self.type_id)
            .finish_non_exhaustive()
    }
}

/// Append-only factory tables.
#[derive(Default)]
pub struct TypeRegistry {
    by_type: DashMap<Oid, TypeFactory>,
    by_class: DashMap<Arc<str>, ManagedBinding>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` for `type_id`, returning the factory it replaced.
    pub fn register_database_type(
        &self,
        type_id: Oid,
        factory: TypeFactory,
    ) -> Option<TypeFactory> {
        let previous = self.by_type.insert(type_id, factory);
        if previous.is_some() {
            log::warn!("[TypeRegistry] replacing factory for type {}", type_id);
        } else {
            log::debug!("[TypeRegistry] registered type {}", type_id);
        }
        previous
    }

    /// Register a managed class backed by database type `type_id`.
    pub fn register_managed_type(
        &self,
        class_name: &str,
        type_id: Oid,
        factory: TypeFactory,
    ) -> Option<ManagedBinding> {
        let previous = self
            .by_class
            .insert(Arc::from(class_name), ManagedBinding { type_id, factory });
        if previous.is_some() {
            log::warn!("[TypeRegistry] replacing factory for class {}", class_name);
        } else {
            log::debug!(
                "[TypeRegistry] registered class {} -> type {}",
                class_name,
                type_id
            );
        }
        previous
    }

    #[must_use]
    pub fn lookup_database_type(&self, type_id: Oid) -> Option<TypeFactory> {
        self.by_type.get(&type_id).map(|entry| Arc::clone(entry.value()))
    }

    #[must_use]
    pub fn lookup_managed_type(&self, class_name: &str) -> Option<ManagedBinding> {
        self.by_class.get(class_name).map(|entry| entry.value().clone())
    }

    /// Number of registered database types.
    #[must_use]
    pub fn database_type_count(&self) -> usize {
        self.by_type.len()
    }

    #[must_use]
    pub fn managed_type_count(&self) -> usize {
        self.by_class.len()
    }
}
