//! Tagged-primitive tokenizer.
//!
//! Grammar, repeated with only whitespace between tokens:
//!
//! ```text
//! TYPE { val: VALUE }
//!
//! TYPE   BOOL | U32 | U64 | BYTES      (any case)
//! VALUE  true | false | digits | [b0, b1, ...]
//! ```
//!
//! BYTES is read as a big-endian unsigned integer of `8 × len` bits.

use std::sync::OnceLock;

use num_bigint::BigUint;
use num_traits::Zero;
use regex::Regex;

use super::{Primitive, WitnessError};

const TOKEN_PATTERN: &str =
    r"(?i)\b(BOOL|U32|U64|BYTES)\s*\{\s*val\s*:\s*(true|false|\d+|\[[^\]]*\])\s*\}";

const SNIPPET_CHARS: usize = 24;

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"))
}

/// Decode every token of a witness dump, in order.
pub fn decode_witness(text: &str) -> Result<Vec<Primitive>, WitnessError> {
    let mut primitives = Vec::new();
    let mut cursor = 0;

    for caps in token_regex().captures_iter(text) {
        let (Some(whole), Some(tag), Some(value)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        expect_blank(text, cursor, whole.start())?;
        primitives.push(decode_token(tag.as_str(), value.as_str(), whole.start())?);
        cursor = whole.end();
    }
    expect_blank(text, cursor, text.len())?;

    Ok(primitives)
}

fn expect_blank(text: &str, from: usize, to: usize) -> Result<(), WitnessError> {
    let gap = &text[from..to];
    match gap.find(|c: char| !c.is_whitespace()) {
        None => Ok(()),
        Some(i) => Err(WitnessError::Grammar {
            offset: from + i,
            snippet: gap[i..].chars().take(SNIPPET_CHARS).collect(),
        }),
    }
}

fn decode_token(tag: &str, value: &str, offset: usize) -> Result<Primitive, WitnessError> {
    match tag.to_ascii_uppercase().as_str() {
        "BOOL" => match value.to_ascii_lowercase().as_str() {
            "true" => Ok(Primitive::new(1u8, 1)),
            "false" => Ok(Primitive::new(0u8, 1)),
            _ => Err(out_of_range("BOOL", value)),
        },
        "U32" => unsigned(value, "U32", 32),
        "U64" => unsigned(value, "U64", 64),
        _ => bytes(value, offset),
    }
}

fn out_of_range(tag: &'static str, value: &str) -> WitnessError {
    WitnessError::ValueOutOfRange { tag, value: value.to_string() }
}

fn unsigned(value: &str, tag: &'static str, width: u32) -> Result<Primitive, WitnessError> {
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(out_of_range(tag, value));
    }
    let parsed = BigUint::parse_bytes(value.as_bytes(), 10)
        .ok_or_else(|| out_of_range(tag, value))?;
    if parsed.bits() > u64::from(width) {
        return Err(out_of_range(tag, value));
    }
    Ok(Primitive::new(parsed, width))
}

fn bytes(value: &str, offset: usize) -> Result<Primitive, WitnessError> {
    let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) else {
        return Err(out_of_range("BYTES", value));
    };

    let mut entries: Vec<&str> = inner.split(',').map(str::trim).collect();
    // `[]` and a single trailing comma
    if entries.last().is_some_and(|last| last.is_empty()) {
        entries.pop();
    }

    let mut raw = Vec::with_capacity(entries.len());
    for entry in entries {
        let byte = entry
            .parse::<u8>()
            .ok()
            .filter(|_| entry.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| WitnessError::ByteOutOfRange {
                offset,
                value: entry.to_string(),
            })?;
        raw.push(byte);
    }

    let width = u32::try_from(raw.len() * 8).map_err(|_| out_of_range("BYTES", value))?;
    let value = if raw.is_empty() { BigUint::zero() } else { BigUint::from_bytes_be(&raw) };
    Ok(Primitive::new(value, width))
}

// =============================================================================
// TESTS
// =============================================================================
