// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Byte transcoding with explicit ownership.
//!
//! Two entry shapes funnel into [`convert`]:
//! - [`transcode`] for length-delimited spans (database text payloads),
//! - [`transcode_cstr`] for NUL-terminated strings (routine output, managed
//!   string exports).
//!
//! The result says whether it aliases the input (`Borrowed`) or owns a fresh
//! buffer (`Owned`). Owned buffers are released on drop; borrowed ones belong
//! to whoever owns the input.

use super::codec;
use super::{Encoding, EncodingError};
use std::ffi::{CStr, CString};

/// Outcome of a transcoding request.
#[derive(Debug, PartialEq, Eq)]
pub enum Transcoded<'a> {
    /// Zero-length input. Nothing was converted or allocated.
    Empty,
    /// No conversion was needed; this is the caller's input span.
    Borrowed(&'a [u8]),
    /// Freshly converted bytes owned by the caller.
    Owned(Vec<u8>),
}

impl Transcoded<'_> {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Empty => &[],
            Self::Borrowed(bytes) => bytes,
            Self::Owned(bytes) => bytes,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// True when there are no bytes, whatever the variant.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the bytes alias the input and must not be released here.
    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed(_))
    }

    /// Take an owned copy, copying only when the bytes are borrowed.
    #[must_use]
    pub fn into_owned(self) -> Vec<u8> {
        match self {
            Self::Empty => Vec::new(),
            Self::Borrowed(bytes) => bytes.to_vec(),
            Self::Owned(bytes) => bytes,
        }
    }

    /// Owned NUL-terminated copy of bytes encoded in `encoding`.
    ///
    /// Transcoded text never contains NUL, but the check stays explicit.
    pub fn into_cstring(self, encoding: Encoding) -> Result<CString, EncodingError> {
        let bytes = self.into_owned();
        CString::new(bytes).map_err(|_| EncodingError::InvalidByteSequence {
            encoding,
            bytes: "0x00".to_string(),
        })
    }
}

/// Conversion primitive shared by both entry shapes.
///
/// Returns `Borrowed(bytes)` when no conversion is required: same encoding,
/// a `SQL_ASCII` target, or a `SQL_ASCII` source whose bytes verify in the
/// target encoding.
pub fn convert(
    bytes: &[u8],
    from: Encoding,
    to: Encoding,
) -> Result<Transcoded<'_>, EncodingError> {
    if from == to || to == Encoding::SqlAscii {
        return Ok(Transcoded::Borrowed(bytes));
    }
    if from == Encoding::SqlAscii {
        codec::verify(bytes, to)?;
        return Ok(Transcoded::Borrowed(bytes));
    }

    let converted = codec::recode(bytes, from, to)?;
    log::trace!(
        "[transcode] {} -> {}: {} bytes in, {} bytes out",
        from,
        to,
        bytes.len(),
        converted.len()
    );
    Ok(Transcoded::Owned(converted))
}

/// Transcode a length-delimited byte span.
///
/// Zero-length input short-circuits to [`Transcoded::Empty`].
pub fn transcode(
    bytes: &[u8],
    from: Encoding,
    to: Encoding,
) -> Result<Transcoded<'_>, EncodingError> {
    if bytes.is_empty() {
        return Ok(Transcoded::Empty);
    }
    convert(bytes, from, to)
}

/// Transcode a NUL-terminated string. The terminator is not part of the result.
pub fn transcode_cstr(
    cstr: &CStr,
    from: Encoding,
    to: Encoding,
) -> Result<Transcoded<'_>, EncodingError> {
    transcode(cstr.to_bytes(), from, to)
}
