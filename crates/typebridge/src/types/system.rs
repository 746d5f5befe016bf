// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Process-scoped type system.
//!
//! Owns the registry, the descriptor cache and the String kind. One instance
//! lives for the lifetime of the hosting process and is passed explicitly to
//! the call-dispatch bridge.

use super::{Oid, TypeCache, TypeDescriptor, TypeFactory, TypeRegistry};
use crate::backend::{Backend, CatalogEntry};
use crate::config::BridgeConfig;
use crate::error::{CoerceError, Result};
use crate::runtime::ManagedRuntime;
use crate::string::{self, StringClass};
use std::fmt;
use std::sync::Arc;

/// Registry, cache and String kind of one process.
pub struct TypeSystem {
    config: BridgeConfig,
    registry: TypeRegistry,
    cache: TypeCache,
    string_class: Arc<StringClass>,
}

impl fmt::Debug for TypeSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeSystem")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TypeSystem {
    /// Resolve the managed classes the String kind needs and register the
    /// built-in text types.
    pub fn initialize(config: BridgeConfig, runtime: &mut dyn ManagedRuntime) -> Result<Self> {
        config.validate()?;

        let string_class = Arc::new(StringClass::initialize(runtime)?);
        let registry = TypeRegistry::new();
        if config.register_builtin_types {
            string::register_builtins(&registry, &string_class, &config.extra_text_types);
        } else {
            for type_id in &config.extra_text_types {
                registry.register_database_type(*type_id, string_class.factory());
            }
        }

        log::info!(
            "[TypeSystem] initialized: {} database types, {} managed classes, fallback={}",
            registry.database_type_count(),
            registry.managed_type_count(),
            config.fallback_to_string
        );

        Ok(Self {
            cache: TypeCache::new(config.cache_capacity),
            config,
            registry,
            string_class,
        })
    }

    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    #[must_use]
    pub fn cache(&self) -> &TypeCache {
        &self.cache
    }

    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    #[must_use]
    pub fn string_class(&self) -> &Arc<StringClass> {
        &self.string_class
    }

    /// Descriptor for database type `type_id`, built on first use.
    ///
    /// The catalog entry is read once, on the miss that builds the descriptor.
    pub fn resolve_type(&self, backend: &dyn Backend, type_id: Oid) -> Result<Arc<TypeDescriptor>> {
        if let Some(hit) = self.cache.get(type_id) {
            return Ok(hit);
        }
        let factory = self.factory_for(type_id)?;
        self.build_from_catalog(backend, type_id, &factory)
    }

    /// Descriptor for a managed class name, via the database type backing it.
    pub fn resolve_managed_type(
        &self,
        backend: &dyn Backend,
        class_name: &str,
    ) -> Result<Arc<TypeDescriptor>> {
        let binding = self
            .registry
            .lookup_managed_type(class_name)
            .ok_or_else(|| CoerceError::UnknownManagedClass(class_name.to_string()))?;
        if let Some(hit) = self.cache.get(binding.type_id) {
            return Ok(hit);
        }
        log::debug!(
            "[TypeSystem] class {} resolves through type {}",
            class_name,
            binding.type_id
        );
        self.build_from_catalog(backend, binding.type_id, &binding.factory)
    }

    /// Descriptor built from a catalog entry the caller already holds.
    pub fn resolve_with_entry(&self, entry: &CatalogEntry) -> Result<Arc<TypeDescriptor>> {
        let type_id = entry.type_id;
        if let Some(hit) = self.cache.get(type_id) {
            return Ok(hit);
        }
        let factory = self.factory_for(type_id)?;
        self.cache.get_or_try_build(type_id, || factory(type_id, entry))
    }

    /// Drop every descriptor and factory, then release the String kind's
    /// global references.
    ///
    /// Descriptors still held by callers keep the kind alive; its references
    /// are then left to the runtime's teardown. Returns whether the global
    /// references were released.
    pub fn shutdown(self, runtime: &mut dyn ManagedRuntime) -> bool {
        let Self {
            cache,
            registry,
            string_class,
            ..
        } = self;
        let cached = cache.len();
        drop(cache);
        drop(registry);

        match Arc::try_unwrap(string_class) {
            Ok(class) => {
                class.release(runtime);
                log::info!("[TypeSystem] shut down, {} descriptors dropped", cached);
                true
            }
            Err(shared) => {
                // Each String descriptor holds two: its class and its coercer.
                log::warn!(
                    "[TypeSystem] String kind still has {} references outside the system; \
                     global refs not released",
                    Arc::strong_count(&shared) - 1
                );
                false
            }
        }
    }

    fn factory_for(&self, type_id: Oid) -> Result<TypeFactory> {
        if let Some(factory) = self.registry.lookup_database_type(type_id) {
            return Ok(factory);
        }
        if self.config.fallback_to_string {
            log::debug!("[TypeSystem] type {} unregistered, using String kind", type_id);
            return Ok(self.string_class.factory());
        }
        Err(CoerceError::NoCoercion(type_id))
    }

    fn build_from_catalog(
        &self,
        backend: &dyn Backend,
        type_id: Oid,
        factory: &TypeFactory,
    ) -> Result<Arc<TypeDescriptor>> {
        self.cache.get_or_try_build(type_id, || {
            let entry = backend
                .lookup_type(type_id)
                .map_err(|source| CoerceError::CatalogLookup { type_id, source })?;
            factory(type_id, &entry)
        })
    }
}
