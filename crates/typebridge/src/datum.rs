// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native database values.
//!
//! A `Datum` is either a pass-by-value machine word or a pass-by-reference
//! byte image (text, varlena payloads). "No value" is never a `Datum`: the
//! API uses `Option<Datum>` for it.

/// Owned native database value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Datum(Repr);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr {
    Word(u64),
    Bytes(Box<[u8]>),
}

impl Datum {
    /// Pass-by-value datum (integers, booleans, oids).
    #[must_use]
    pub const fn from_word(word: u64) -> Self {
        Self(Repr::Word(word))
    }

    /// Pass-by-reference datum holding a copy of `bytes`.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Box<[u8]>>) -> Self {
        Self(Repr::Bytes(bytes.into()))
    }

    #[must_use]
    pub const fn as_word(&self) -> Option<u64> {
        match &self.0 {
            Repr::Word(word) => Some(*word),
            Repr::Bytes(_) => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.0 {
            Repr::Word(_) => None,
            Repr::Bytes(bytes) => Some(bytes),
        }
    }

    #[must_use]
    pub const fn is_by_value(&self) -> bool {
        matches!(self.0, Repr::Word(_))
    }
}
