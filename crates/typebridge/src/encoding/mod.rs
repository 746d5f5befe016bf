// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Text encodings and the byte transcoder.
//!
//! The database stores text in its configured server encoding; the managed
//! runtime exchanges strings as UTF-8. [`transcode`] and [`transcode_cstr`]
//! move bytes between the two and report ownership explicitly through
//! [`Transcoded`], so callers never have to compare pointers to decide what to
//! release.
//!
//! ## Supported encodings
//!
//! | Name | Id | Notes |
//! |------|----|-------|
//! | `SQL_ASCII` | 0 | No conversion, bytes verified against the other side |
//! | `UTF8` | 6 | Managed runtime encoding |
//! | `LATIN1` | 8 | ISO-8859-1 |
//! | `WIN1252` | 24 | Windows-1252, five undefined code points |

mod codec;
mod transcode;

pub use transcode::{convert, transcode, transcode_cstr, Transcoded};

use std::fmt;
use std::str::FromStr;

/// Encoding the managed runtime uses for string import/export.
pub const MANAGED_ENCODING: Encoding = Encoding::Utf8;

/// Text encodings understood by the transcoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Bytes are taken as-is; no conversion is ever performed.
    SqlAscii,
    Utf8,
    /// ISO-8859-1.
    Latin1,
    /// Windows code page 1252.
    Win1252,
}

impl Encoding {
    /// Canonical database name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SqlAscii => "SQL_ASCII",
            Self::Utf8 => "UTF8",
            Self::Latin1 => "LATIN1",
            Self::Win1252 => "WIN1252",
        }
    }

    /// Numeric identifier used by the database catalog.
    #[must_use]
    pub const fn id(self) -> i32 {
        match self {
            Self::SqlAscii => 0,
            Self::Utf8 => 6,
            Self::Latin1 => 8,
            Self::Win1252 => 24,
        }
    }

    pub fn from_id(id: i32) -> Result<Self, EncodingError> {
        match id {
            0 => Ok(Self::SqlAscii),
            6 => Ok(Self::Utf8),
            8 => Ok(Self::Latin1),
            24 => Ok(Self::Win1252),
            other => Err(EncodingError::UnknownEncodingId(other)),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Names compare case-insensitively, ignoring '-' and '_'.
        let folded: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match folded.as_str() {
            "SQLASCII" => Ok(Self::SqlAscii),
            "UTF8" | "UNICODE" => Ok(Self::Utf8),
            "LATIN1" | "ISO88591" => Ok(Self::Latin1),
            "WIN1252" | "CP1252" => Ok(Self::Win1252),
            _ => Err(EncodingError::UnknownEncoding(s.to_string())),
        }
    }
}

/// Errors raised while converting text between encodings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// Input bytes are not valid in their declared encoding.
    #[error("invalid byte sequence for encoding \"{encoding}\": {bytes}")]
    InvalidByteSequence { encoding: Encoding, bytes: String },
    /// A valid character has no representation in the target encoding.
    #[error(
        "character with byte sequence {bytes} in encoding \"{from}\" has no equivalent in encoding \"{to}\""
    )]
    Untranslatable {
        from: Encoding,
        to: Encoding,
        bytes: String,
    },
    #[error("invalid encoding name \"{0}\"")]
    UnknownEncoding(String),
    #[error("invalid encoding number {0}")]
    UnknownEncodingId(i32),
}

/// Render bytes the way the database reports them: `0xc3 0x28`.
pub(crate) fn format_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("0x{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
