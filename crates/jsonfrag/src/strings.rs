//! Escape- and UTF-8-aware string decoding.
//!
//! Decodes raw token bytes (the text between the quotes) to a `String` one
//! byte at a time: short escapes, exactly-four-hex-digit `\uXXXX` escapes
//! with surrogate pairing for non-BMP characters, and 2/3/4-byte UTF-8
//! sequences whose continuation bytes are each validated against `10xxxxxx`.

use alloc::string::String;

use crate::error::ParseError;

const HIGH_SURROGATES: core::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;
const LOW_SURROGATES: core::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

/// Decodes the body of a JSON string token.
pub(crate) fn decode_string(bytes: &[u8]) -> Result<String, ParseError> {
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\\' {
            i = decode_escape(bytes, i + 1, &mut out)?;
        } else if b < 0x80 {
            out.push(b as char);
            i += 1;
        } else {
            i = decode_utf8_sequence(bytes, i, &mut out)?;
        }
    }
    Ok(out)
}

/// Decodes one escape sequence starting after the backslash; returns the
/// index of the first byte past it.
fn decode_escape(bytes: &[u8], i: usize, out: &mut String) -> Result<usize, ParseError> {
    let Some(&b) = bytes.get(i) else {
        return Err(ParseError::InvalidEscape("truncated escape"));
    };
    let short = match b {
        b'b' => Some('\u{0008}'),
        b't' => Some('\t'),
        b'n' => Some('\n'),
        b'f' => Some('\u{000C}'),
        b'r' => Some('\r'),
        b'"' => Some('"'),
        b'/' => Some('/'),
        b'\\' => Some('\\'),
        b'u' => None,
        _ => return Err(ParseError::InvalidEscape("unknown escape letter")),
    };
    if let Some(c) = short {
        out.push(c);
        return Ok(i + 1);
    }

    let (unit, mut next) = hex4(bytes, i + 1)?;
    let code = if HIGH_SURROGATES.contains(&unit) {
        // Non-BMP characters arrive as two consecutive \uXXXX escapes.
        if bytes.get(next) != Some(&b'\\') || bytes.get(next + 1) != Some(&b'u') {
            return Err(ParseError::InvalidEscape("unpaired high surrogate"));
        }
        let (low, after) = hex4(bytes, next + 2)?;
        if !LOW_SURROGATES.contains(&low) {
            return Err(ParseError::InvalidEscape("unpaired high surrogate"));
        }
        next = after;
        (((unit - 0xD800) << 10) | (low - 0xDC00)) + 0x1_0000
    } else if LOW_SURROGATES.contains(&unit) {
        return Err(ParseError::InvalidEscape("unpaired low surrogate"));
    } else {
        unit
    };

    match char::from_u32(code) {
        Some(c) => {
            out.push(c);
            Ok(next)
        }
        None => Err(ParseError::InvalidEscape("invalid code point")),
    }
}

/// Reads exactly four hex digits at `i`; a shorter or malformed run is an
/// error. Returns the code unit and the index past the digits.
fn hex4(bytes: &[u8], i: usize) -> Result<(u32, usize), ParseError> {
    if bytes.len() < i + 4 {
        return Err(ParseError::InvalidEscape("truncated unicode escape"));
    }
    let mut unit = 0u32;
    for &b in &bytes[i..i + 4] {
        let digit = match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'a'..=b'f' => u32::from(b - b'a') + 10,
            b'A'..=b'F' => u32::from(b - b'A') + 10,
            _ => return Err(ParseError::InvalidEscape("malformed unicode escape")),
        };
        unit = (unit << 4) | digit;
    }
    Ok((unit, i + 4))
}

/// Decodes one multi-byte UTF-8 sequence starting at `i`; returns the index
/// of the first byte past it.
fn decode_utf8_sequence(bytes: &[u8], i: usize, out: &mut String) -> Result<usize, ParseError> {
    let lead = bytes[i];
    let (len, mut code) = match lead {
        0xC0..=0xDF => (2, u32::from(lead & 0x1F)),
        0xE0..=0xEF => (3, u32::from(lead & 0x0F)),
        0xF0..=0xF7 => (4, u32::from(lead & 0x07)),
        _ => return Err(ParseError::InvalidUtf8(lead)),
    };
    if bytes.len() < i + len {
        return Err(ParseError::InvalidUtf8(lead));
    }
    for &b in &bytes[i + 1..i + len] {
        if b & 0xC0 != 0x80 {
            return Err(ParseError::InvalidUtf8(b));
        }
        code = (code << 6) | u32::from(b & 0x3F);
    }
    match char::from_u32(code) {
        Some(c) => {
            out.push(c);
            Ok(i + len)
        }
        // Surrogate halves encoded as raw UTF-8.
        None => Err(ParseError::InvalidUtf8(lead)),
    }
}
