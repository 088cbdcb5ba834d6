//! Quoted-printable encoding and decoding (RFC 2045).
//!
//! Both directions operate on fully materialized buffers and treat their
//! input as raw bytes, so non-UTF-8 payloads survive unchanged:
//!
//! ```
//! use libquoted::{decode, encode, ParseMode};
//!
//! let encoded = encode("Café = coffee");
//! assert_eq!(encoded, "Caf=C3=A9 =3D coffee");
//! assert_eq!(decode(&encoded, ParseMode::Robust).unwrap(), "Café = coffee".as_bytes());
//! ```
//!
//! No line folding is applied on encode; output lines may be arbitrarily long.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

/// How [`decode`] treats input that is not well-formed quoted-printable.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Reject the input on the first violation.
    Strict,
    /// Pass malformed escapes through literally and accept lowercase hex.
    #[default]
    Robust,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QuotedPrintableError {
    #[error("byte outside the quoted-printable alphabet")]
    InvalidByte,
    #[error("'=' followed by a single character at end of input")]
    IncompleteHexOctet,
    #[error("'=' not followed by two hex digits")]
    InvalidHexOctet,
    #[error("lowercase hex digit in escape sequence")]
    LowercaseHexOctet,
}

const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";

fn is_literal(byte: u8) -> bool {
    matches!(byte, b' ' | b'!'..=b'<' | b'>'..=b'~')
}

fn is_qp_text(byte: u8) -> bool {
    matches!(byte, b'\t' | b'\n' | b'\r' | b' '..=b'~')
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}

/// Encodes `input` as quoted-printable text.
///
/// Space and printable ASCII other than `=` are copied through; every other
/// byte becomes an `=XX` escape with uppercase hex digits. Never fails.
pub fn encode<R: AsRef<[u8]>>(input: R) -> String {
    let input = input.as_ref();
    let mut encoded = String::with_capacity(input.len());
    for &byte in input {
        if is_literal(byte) {
            encoded.push(byte as char);
        } else {
            encoded.push('=');
            encoded.push(HEX_CHARS[(byte >> 4) as usize] as char);
            encoded.push(HEX_CHARS[(byte & 0x0F) as usize] as char);
        }
    }
    encoded
}

/// Decodes quoted-printable `input` back into raw bytes.
///
/// A `=` at the very end of the input, or directly before a line break, is a
/// soft line break and produces nothing. In [`ParseMode::Robust`] this never
/// returns an error: an `=` that does not start a valid escape is kept as a
/// literal and scanning resumes right after it. In [`ParseMode::Strict`] the
/// first malformed sequence fails the whole call.
pub fn decode<R: AsRef<[u8]>>(input: R, mode: ParseMode) -> Result<Vec<u8>, QuotedPrintableError> {
    let input = input.as_ref();
    if input.is_empty() {
        return Ok(Vec::new());
    }
    let strict = mode == ParseMode::Strict;
    if strict && !input.iter().all(|&b| is_qp_text(b)) {
        return Err(QuotedPrintableError::InvalidByte);
    }

    let mut decoded = Vec::with_capacity(input.len());
    let mut pos = 0;
    while pos < input.len() {
        let byte = input[pos];
        if byte != b'=' {
            decoded.push(byte);
            pos += 1;
            continue;
        }

        match &input[pos + 1..] {
            [] => pos += 1,
            [b'\n', ..] => pos += 2,
            [b'\r', b'\n', ..] => pos += 3,
            [_] => {
                if strict {
                    return Err(QuotedPrintableError::IncompleteHexOctet);
                }
                decoded.push(byte);
                pos += 1;
            }
            [upper, lower, ..] => match (hex_value(*upper), hex_value(*lower)) {
                (Some(high), Some(low)) => {
                    if strict && (upper.is_ascii_lowercase() || lower.is_ascii_lowercase()) {
                        return Err(QuotedPrintableError::LowercaseHexOctet);
                    }
                    decoded.push(high << 4 | low);
                    pos += 3;
                }
                _ => {
                    if strict {
                        return Err(QuotedPrintableError::InvalidHexOctet);
                    }
                    decoded.push(byte);
                    pos += 1;
                }
            },
        }
    }
    Ok(decoded)
}
