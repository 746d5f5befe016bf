// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Managed string <-> database text helpers.
//!
//! Every value crossing the boundary is copied: managed strings are built
//! from fresh UTF-8, and database text is built from an owned transcoded
//! buffer. The pinned chars of a managed string are released on every path,
//! including failures.
//!
//! Functions taking a `string: &LocalRef` expect a managed string; use
//! [`StringClass::to_database_cstring`](super::StringClass::to_database_cstring)
//! for arbitrary objects.

use crate::datum::Datum;
use crate::encoding::{transcode, transcode_cstr, Encoding, Transcoded, MANAGED_ENCODING};
use crate::error::{CoerceError, Result};
use crate::runtime::{LocalRef, ManagedRuntime};
use std::ffi::{CStr, CString};

/// Build a managed string from a length-delimited database text payload.
///
/// Returns `None` for zero-length text.
pub fn managed_string_from_text(
    runtime: &mut dyn ManagedRuntime,
    db_encoding: Encoding,
    text: &[u8],
) -> Result<Option<LocalRef>> {
    match transcode(text, db_encoding, MANAGED_ENCODING)? {
        Transcoded::Empty => Ok(None),
        // The span is not NUL-terminated, so even borrowed bytes need a copy.
        transcoded => {
            let utf8 = transcoded.into_cstring(MANAGED_ENCODING)?;
            new_string(runtime, &utf8).map(Some)
        }
    }
}

/// Build a managed string from NUL-terminated text in the database encoding.
///
/// Returns `None` for an empty string.
pub fn managed_string_from_cstr(
    runtime: &mut dyn ManagedRuntime,
    db_encoding: Encoding,
    cstr: &CStr,
) -> Result<Option<LocalRef>> {
    match transcode_cstr(cstr, db_encoding, MANAGED_ENCODING)? {
        Transcoded::Empty => Ok(None),
        // Already valid UTF-8: hand over the caller's buffer as-is.
        Transcoded::Borrowed(_) => new_string(runtime, cstr).map(Some),
        owned @ Transcoded::Owned(_) => {
            let utf8 = owned.into_cstring(MANAGED_ENCODING)?;
            new_string(runtime, &utf8).map(Some)
        }
    }
}

/// Copy a managed string into a text datum in the database encoding.
pub fn text_from_managed_string(
    runtime: &mut dyn ManagedRuntime,
    db_encoding: Encoding,
    string: &LocalRef,
) -> Result<Datum> {
    with_utf_chars(runtime, string, |utf8| {
        let converted = transcode_cstr(utf8, MANAGED_ENCODING, db_encoding)?;
        Ok(Datum::from_bytes(converted.into_owned()))
    })
}

/// Copy a managed string into an owned NUL-terminated buffer in the database
/// encoding. Always a copy, even when no conversion was needed.
pub fn cstring_from_managed_string(
    runtime: &mut dyn ManagedRuntime,
    db_encoding: Encoding,
    string: &LocalRef,
) -> Result<CString> {
    with_utf_chars(runtime, string, |utf8| {
        let converted = transcode_cstr(utf8, MANAGED_ENCODING, db_encoding)?;
        Ok(converted.into_cstring(db_encoding)?)
    })
}

/// Append a managed string, converted to the database encoding, to `buf`.
pub fn append_managed_string(
    runtime: &mut dyn ManagedRuntime,
    db_encoding: Encoding,
    buf: &mut Vec<u8>,
    string: &LocalRef,
) -> Result<()> {
    with_utf_chars(runtime, string, |utf8| {
        let converted = transcode_cstr(utf8, MANAGED_ENCODING, db_encoding)?;
        buf.extend_from_slice(converted.as_bytes());
        Ok(())
    })
}

fn new_string(runtime: &mut dyn ManagedRuntime, utf8: &CStr) -> Result<LocalRef> {
    runtime
        .new_string_utf(utf8)
        .ok_or(CoerceError::managed("string creation"))
}

/// Pin the chars of `string`, run `f`, and release the chars whatever `f` returned.
fn with_utf_chars<T>(
    runtime: &mut dyn ManagedRuntime,
    string: &LocalRef,
    f: impl FnOnce(&CStr) -> Result<T>,
) -> Result<T> {
    let chars = runtime
        .get_string_utf_chars(string)
        .ok_or(CoerceError::managed("string access"))?;
    let result = f(chars.as_cstr());
    runtime.release_string_utf_chars(string, chars);
    result
}
