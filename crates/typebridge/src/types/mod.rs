// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type abstraction layer.
//!
//! # Architecture
//!
//! ```text
//! TypeSystem::resolve_type(oid)
//!   -> TypeCache hit?            -> Arc<TypeDescriptor>
//!   -> TypeRegistry factory      (else String fallback)
//!   -> Backend::lookup_type(oid) -> factory(oid, entry) -> cached
//! ```

mod cache;
mod class;
mod descriptor;
mod oid;
mod registry;
mod system;

pub use cache::{LookupStats, TypeCache};
pub use class::{Coercible, TypeClass};
pub use descriptor::TypeDescriptor;
pub use oid::Oid;
pub use registry::{ManagedBinding, TypeFactory, TypeRegistry};
pub use system::TypeSystem;
