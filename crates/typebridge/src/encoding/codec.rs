// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-encoding verification, decoding and encoding.

use super::{format_bytes, Encoding, EncodingError};

/// WIN1252 code points for bytes 0x80..=0x9F. `None` marks undefined bytes.
const WIN1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

fn invalid(encoding: Encoding, bytes: &[u8]) -> EncodingError {
    EncodingError::InvalidByteSequence {
        encoding,
        bytes: format_bytes(bytes),
    }
}

/// Check that `bytes` is well formed in `encoding`. NUL is never valid text.
pub(super) fn verify(bytes: &[u8], encoding: Encoding) -> Result<(), EncodingError> {
    if let Some(pos) = bytes.iter().position(|b| *b == 0) {
        return Err(invalid(encoding, &bytes[pos..=pos]));
    }
    if encoding == Encoding::Utf8 {
        verify_utf8(bytes)?;
    }
    Ok(())
}

fn verify_utf8(bytes: &[u8]) -> Result<&str, EncodingError> {
    std::str::from_utf8(bytes).map_err(|e| {
        let start = e.valid_up_to();
        let end = match e.error_len() {
            Some(len) => start + len,
            None => bytes.len(),
        };
        invalid(Encoding::Utf8, &bytes[start..end])
    })
}

/// Decode `bytes` from `from` and re-encode every character into `to`.
///
/// `from` must not be `SQL_ASCII`; that case never reaches the codec.
pub(super) fn recode(bytes: &[u8], from: Encoding, to: Encoding) -> Result<Vec<u8>, EncodingError> {
    let mut out = Vec::with_capacity(bytes.len() + bytes.len() / 2);
    match from {
        Encoding::Utf8 => {
            let text = verify_utf8(bytes)?;
            for (idx, ch) in text.char_indices() {
                let src = &bytes[idx..idx + ch.len_utf8()];
                encode_char(ch, src, from, to, &mut out)?;
            }
        }
        Encoding::Latin1 | Encoding::Win1252 | Encoding::SqlAscii => {
            for (idx, byte) in bytes.iter().enumerate() {
                let src = &bytes[idx..=idx];
                let ch = decode_single_byte(*byte, from)
                    .ok_or_else(|| untranslatable(src, from, to))?;
                encode_char(ch, src, from, to, &mut out)?;
            }
        }
    }
    Ok(out)
}

/// `None` for bytes the encoding leaves undefined.
fn decode_single_byte(byte: u8, encoding: Encoding) -> Option<char> {
    match (encoding, byte) {
        (_, 0x00..=0x7F) => Some(char::from(byte)),
        (Encoding::Win1252, 0x80..=0x9F) => WIN1252_HIGH[usize::from(byte - 0x80)],
        _ => Some(char::from(byte)),
    }
}

fn untranslatable(src: &[u8], from: Encoding, to: Encoding) -> EncodingError {
    EncodingError::Untranslatable {
        from,
        to,
        bytes: format_bytes(src),
    }
}

fn encode_char(
    ch: char,
    src: &[u8],
    from: Encoding,
    to: Encoding,
    out: &mut Vec<u8>,
) -> Result<(), EncodingError> {
    if ch == '\0' {
        return Err(invalid(from, src));
    }
    match to {
        Encoding::Utf8 => {
            let mut buf = [0u8; 4];
            out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        }
        Encoding::Latin1 => {
            let byte = u8::try_from(u32::from(ch)).map_err(|_| untranslatable(src, from, to))?;
            out.push(byte);
        }
        Encoding::Win1252 => {
            let byte = encode_win1252(ch).ok_or_else(|| untranslatable(src, from, to))?;
            out.push(byte);
        }
        Encoding::SqlAscii => out.extend_from_slice(src),
    }
    Ok(())
}

fn encode_win1252(ch: char) -> Option<u8> {
    let code = u32::from(ch);
    if code < 0x80 || (0xA0..=0xFF).contains(&code) {
        return u8::try_from(code).ok();
    }
    WIN1252_HIGH
        .iter()
        .position(|slot| *slot == Some(ch))
        .and_then(|idx| u8::try_from(idx).ok())
        .map(|idx| 0x80 + idx)
}
