// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Database type identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable numeric identifier the database catalog assigns to a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Oid(pub u32);

impl Oid {
    /// Never assigned to a real catalog entry.
    pub const INVALID: Oid = Oid(0);

    // Built-in text-like types handled by the String kind.
    pub const NAME: Oid = Oid(19);
    pub const TEXT: Oid = Oid(25);
    pub const BPCHAR: Oid = Oid(1042);
    pub const VARCHAR: Oid = Oid(1043);
    pub const CSTRING: Oid = Oid(2275);

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl From<u32> for Oid {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
