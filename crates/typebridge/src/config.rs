// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! typebridge configuration - single source of truth
//!
//! - **Level 1 (Static)**: constants fixed by the database catalog and the
//!   managed runtime (built-in type ids, class names, signatures).
//! - **Level 2 (Dynamic)**: [`BridgeConfig`], read once when the
//!   [`TypeSystem`](crate::TypeSystem) is initialized.
//!
//! # Example
//!
//! ```ignore
//! use typebridge::config::BridgeConfig;
//!
//! let config = BridgeConfig::from_yaml_str("fallback_to_string: false\n")?;
//! let system = TypeSystem::initialize(config, &mut runtime)?;
//! ```

use crate::error::{CoerceError, Result};
use crate::types::Oid;
use serde::{Deserialize, Serialize};

// =======================================================================
// Database constants
// =======================================================================

/// Type modifier meaning "no constraint": routines render the plain form.
pub const TYPMOD_UNSPECIFIED: i32 = -1;

/// Text-like types registered with the String kind at startup.
pub const BUILTIN_TEXT_TYPES: [Oid; 5] = [
    Oid::TEXT,
    Oid::CSTRING,
    Oid::BPCHAR,
    Oid::NAME,
    Oid::VARCHAR,
];

/// Initial bucket count of the descriptor cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 13;

// =======================================================================
// Managed runtime constants
// =======================================================================

/// Fully-qualified name of the managed string class.
pub const MANAGED_STRING_CLASS: &str = "java.lang.String";

/// Binary names used for class lookup.
pub const STRING_CLASS_BINARY_NAME: &str = "java/lang/String";
pub const OBJECT_CLASS_BINARY_NAME: &str = "java/lang/Object";

/// Wire-format signature of the managed string class.
pub const STRING_SIGNATURE: &str = "Ljava/lang/String;";

/// Stringify capability every managed object has.
pub const TO_STRING_METHOD: &str = "toString";
pub const TO_STRING_SIGNATURE: &str = "()Ljava/lang/String;";

// =======================================================================
// Runtime configuration
// =======================================================================

/// Settings applied when the type system starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Register [`BUILTIN_TEXT_TYPES`] and [`MANAGED_STRING_CLASS`].
    pub register_builtin_types: bool,
    /// Coerce unregistered types through their textual form.
    pub fallback_to_string: bool,
    /// Initial capacity of the descriptor cache.
    pub cache_capacity: usize,
    /// Additional type ids served by the String kind (domains, extensions).
    pub extra_text_types: Vec<Oid>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            register_builtin_types: true,
            fallback_to_string: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            extra_text_types: Vec::new(),
        }
    }
}

impl BridgeConfig {
    /// Reject settings the type system cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(CoerceError::Config("cache_capacity must be > 0".into()));
        }
        if let Some(bad) = self.extra_text_types.iter().find(|oid| !oid.is_valid()) {
            return Err(CoerceError::Config(format!(
                "extra_text_types contains invalid type id {}",
                bad
            )));
        }
        Ok(())
    }

    /// Parse and validate a YAML document.
    #[cfg(feature = "config-yaml")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| CoerceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load, parse and validate a YAML file.
    #[cfg(feature = "config-yaml")]
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| CoerceError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&yaml)
    }
}
