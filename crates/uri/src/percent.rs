//! Percent-encoding and decoding of URI components.
//!
//! All operations take an explicit [`encoding_rs::Encoding`] so callers can
//! round-trip content in legacy charsets; the plain `encode`/`decode` pair
//! defaults to UTF-8. URI text itself is expected to be ASCII already (the
//! UTF-8 default only matters for the decoded component content; for pure
//! ASCII the two charsets agree byte for byte). Space always encodes as
//! `%20`, never `+`.

use encoding_rs::{Encoding, UTF_8};

use crate::error::UriSyntaxError;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Returns true for the RFC 3986 unreserved characters, the only bytes the
/// default encoder leaves untouched.
#[must_use]
pub fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

/// Percent-encodes `value` as UTF-8, escaping everything but unreserved
/// characters.
#[must_use]
pub fn encode(value: &str) -> String {
    encode_in(value, UTF_8)
}

/// Percent-encodes `value` in the given charset.
#[must_use]
pub fn encode_in(value: &str, charset: &'static Encoding) -> String {
    encode_with(value, is_unreserved, charset)
}

/// Percent-encodes `value`, leaving bytes accepted by `keep` untouched.
/// `keep` is expected to accept only ASCII bytes.
#[must_use]
pub fn encode_with(value: &str, keep: fn(u8) -> bool, charset: &'static Encoding) -> String {
    let (bytes, _, _) = charset.encode(value);
    let mut out = String::with_capacity(bytes.len());
    for &byte in bytes.iter() {
        if keep(byte) {
            out.push(char::from(byte));
        } else {
            out.push('%');
            out.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
            out.push(char::from(HEX_DIGITS[usize::from(byte & 0x0f)]));
        }
    }
    out
}

/// Percent-decodes `value` as UTF-8.
///
/// # Errors
///
/// Returns [`UriSyntaxError::MalformedEscape`] when a `%` is not followed by
/// two hex digits.
pub fn decode(value: &str) -> Result<String, UriSyntaxError> {
    decode_in(value, UTF_8)
}

/// Percent-decodes `value` in the given charset.
///
/// # Errors
///
/// Returns [`UriSyntaxError::MalformedEscape`] when a `%` is not followed by
/// two hex digits.
pub fn decode_in(value: &str, charset: &'static Encoding) -> Result<String, UriSyntaxError> {
    let raw = value.as_bytes();
    let mut bytes = Vec::with_capacity(raw.len());
    let mut idx = 0;

    while idx < raw.len() {
        if raw[idx] == b'%' {
            let hi = raw.get(idx + 1).copied().and_then(hex_value);
            let lo = raw.get(idx + 2).copied().and_then(hex_value);
            match (hi, lo) {
                (Some(hi), Some(lo)) => {
                    bytes.push((hi << 4) | lo);
                    idx += 3;
                }
                _ => return Err(UriSyntaxError::MalformedEscape(value.to_string())),
            }
        } else {
            bytes.push(raw[idx]);
            idx += 1;
        }
    }

    let (text, _, _) = charset.decode(&bytes);
    Ok(text.into_owned())
}

/// Percent-encodes every element of `values` as UTF-8.
#[must_use]
pub fn encode_all(values: &[String]) -> Vec<String> {
    values.iter().map(|value| encode(value)).collect()
}

/// Percent-decodes every element of `values` as UTF-8.
///
/// # Errors
///
/// Fails on the first element carrying a malformed escape.
pub fn decode_all(values: &[String]) -> Result<Vec<String>, UriSyntaxError> {
    values.iter().map(|value| decode(value)).collect()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
