// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor cache keyed by database type id.
//!
//! The TypeCache guarantees one [`TypeDescriptor`] per type id for its whole
//! lifetime: the first lookup builds it, every later lookup returns the same
//! `Arc`. Entries are never evicted; they go away when the cache is dropped
//! with its owning [`TypeSystem`](super::TypeSystem).
//!
//! Reads take a shared lock. A miss builds with no lock held, so a factory
//! may resolve other types (element types of arrays, composite fields). The
//! write lock is only taken to insert; the first insert wins and racing
//! builders get that same `Arc`, dropping their own descriptor.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use super::{Oid, TypeDescriptor};
use crate::error::Result;

/// Cache hit/miss statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LookupStats {
    pub hits: u64,
    pub misses: u64,
    /// Build time of the most recent miss.
    pub last_miss_ns: u64,
}

/// Identity-preserving descriptor cache.
pub struct TypeCache {
    inner: RwLock<HashMap<Oid, Arc<TypeDescriptor>>>,
    stats: RwLock<LookupStats>,
}

impl TypeCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(HashMap::with_capacity(capacity)),
            stats: RwLock::new(LookupStats::default()),
        }
    }

    /// Cached descriptor for `type_id`, if one was built.
    #[must_use]
    pub fn get(&self, type_id: Oid) -> Option<Arc<TypeDescriptor>> {
        let hit = self.inner.read().get(&type_id).map(Arc::clone);
        if hit.is_some() {
            self.record_hit();
        }
        hit
    }

    /// Return the cached descriptor or build, store and return a new one.
    ///
    /// `build` runs at most once per call and only on a miss, without any
    /// cache lock held. When it fails nothing is stored.
    pub fn get_or_try_build<F>(&self, type_id: Oid, build: F) -> Result<Arc<TypeDescriptor>>
    where
        F: FnOnce() -> Result<TypeDescriptor>,
    {
        if let Some(hit) = self.get(type_id) {
            log::trace!("[TypeCache] hit for type {}", type_id);
            return Ok(hit);
        }

        let start = Instant::now();
        let built = Arc::new(build()?);
        debug_assert_eq!(
            built.type_id(),
            type_id,
            "TypeDescriptor id must match lookup key"
        );

        let mut cache = self.inner.write();
        if let Some(winner) = cache.get(&type_id) {
            // Another caller inserted while we were building.
            let winner = Arc::clone(winner);
            drop(cache);
            self.record_hit();
            log::trace!("[TypeCache] lost build race for type {}", type_id);
            return Ok(winner);
        }
        cache.insert(type_id, Arc::clone(&built));
        drop(cache);

        self.record_miss(start);
        log::debug!(
            "[TypeCache] created {} descriptor for type {}",
            built.class().name(),
            type_id
        );
        Ok(built)
    }

    #[must_use]
    pub fn contains(&self, type_id: Oid) -> bool {
        self.inner.read().contains_key(&type_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> LookupStats {
        *self.stats.read()
    }

    fn record_hit(&self) {
        let mut stats = self.stats.write();
        stats.hits = stats.hits.saturating_add(1);
    }

    fn record_miss(&self, start: Instant) {
        let mut stats = self.stats.write();
        stats.misses = stats.misses.saturating_add(1);
        stats.last_miss_ns = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);
    }
}

impl Default for TypeCache {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CACHE_CAPACITY)
    }
}
