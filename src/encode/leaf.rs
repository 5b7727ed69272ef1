//! Leaf Encoders
//!
//! One pure function per leaf kind. Each takes a generic tree value (possibly
//! null) and returns the canonical leaf or a [`LeafError`]. Encoders know
//! nothing about where the value sits in the document; the mapper attaches
//! the path when it wraps the error.
//!
//! ## Integer Acceptance
//!
//! ```text
//! ┌──────────────────────┬────────────┬──────────────┬───────────┐
//! │ input                │ field      │ u32 / u64    │ hash-like │
//! ├──────────────────────┼────────────┼──────────────┼───────────┤
//! │ null                 │ 0          │ error        │ 0         │
//! │ 42 / "42" / "0042"   │ 42         │ 42           │ 42        │
//! │ -1 / 1.5 / 1e3       │ error      │ error        │ error     │
//! │ "abc"                │ error      │ error        │ base58    │
//! └──────────────────────┴────────────┴──────────────┴───────────┘
//! ```
//!
//! Integers are read from the exact literal digits of the tree, never through
//! a floating-point value.

use std::fmt::Write as _;

use crate::core::base58::{self, Base58Error, TOKEN_ID_VERSION};
use crate::core::field::{FieldElement, FieldError, FIELD_BYTES};
use crate::input::{kind_name, Tree};
use crate::model::leaves::{
    AuthRequired, ByteString, PublicKey, Sign, TokenId, TokenSymbol, ZkappUri,
    MAX_TOKEN_SYMBOL_BYTES,
};

/// Leading byte of a versioned 33-byte hash payload.
const HASH_PAYLOAD_VERSION: u8 = 0x01;

/// Why a single leaf value could not be encoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeafError {
    /// The tree node has the wrong kind for this leaf.
    #[error("expected {expected}, found {found}")]
    WrongShape {
        /// Accepted kind(s).
        expected: &'static str,
        /// Kind present in the input.
        found: &'static str,
    },

    /// A structured leaf lacks one of its keys.
    #[error("missing key '{0}'")]
    MissingKey(&'static str),

    /// A string that is not a decimal integer.
    #[error("'{0}' is not an integer")]
    NotAnInteger(String),

    /// Negative value where an unsigned one is required.
    #[error("negative value {0} for an unsigned leaf")]
    Negative(String),

    /// Fractional or exponent notation.
    #[error("non-integer number {0}")]
    Fractional(String),

    /// Value does not fit the declared bit width.
    #[error("value {value} does not fit in {width} bits")]
    OutOfRange {
        /// Decimal digits as given.
        value: String,
        /// Declared width.
        width: u32,
    },

    /// Field element rejected.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Base58check string rejected.
    #[error(transparent)]
    Base58(#[from] Base58Error),

    /// Byte string longer than its kind allows.
    #[error("{kind} is {len} bytes, at most {max} allowed")]
    TooLong {
        /// Leaf kind.
        kind: &'static str,
        /// Actual length in bytes.
        len: usize,
        /// Maximum length in bytes.
        max: usize,
    },
}

/// A leaf value resolved through a fallback policy.
///
/// `unrecognised` holds the source label when the fallback was taken, so the
/// caller can surface it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    /// Encoded value.
    pub value: T,
    /// Source label that triggered the fallback, if any.
    pub unrecognised: Option<String>,
}

impl<T> Resolved<T> {
    fn exact(value: T) -> Self {
        Self { value, unrecognised: None }
    }

    fn fallback(value: T, label: &str) -> Self {
        Self { value, unrecognised: Some(label.to_string()) }
    }
}

fn wrong_shape(expected: &'static str, found: &Tree) -> LeafError {
    LeafError::WrongShape { expected, found: kind_name(found) }
}

/// Exact unsigned digits of a native integer or all-digit string.
fn unsigned_digits(value: &Tree) -> Result<String, LeafError> {
    match value {
        Tree::Number(n) => {
            let literal = n.to_string();
            if literal.starts_with('-') {
                Err(LeafError::Negative(literal))
            } else if literal.contains(['.', 'e', 'E']) {
                Err(LeafError::Fractional(literal))
            } else {
                Ok(literal)
            }
        }
        Tree::String(s) => {
            if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                Ok(s.clone())
            } else if s.len() > 1
                && s.starts_with('-')
                && s[1..].bytes().all(|b| b.is_ascii_digit())
            {
                Err(LeafError::Negative(s.clone()))
            } else {
                Err(LeafError::NotAnInteger(s.clone()))
            }
        }
        other => Err(wrong_shape("integer or decimal string", other)),
    }
}

// =============================================================================
// FIELD ELEMENTS
// =============================================================================

/// Field element from an integer or decimal string; null is canonical zero.
pub fn encode_field(value: &Tree) -> Result<FieldElement, LeafError> {
    if value.is_null() {
        return Ok(FieldElement::zero());
    }
    let digits = unsigned_digits(value)?;
    Ok(FieldElement::from_decimal(&digits)?)
}

/// Field element that may also arrive as a base58check hash of `version`.
pub fn encode_hash_field(value: &Tree, version: u8) -> Result<FieldElement, LeafError> {
    match value {
        Tree::String(s) if !s.bytes().all(|b| b.is_ascii_digit()) || s.is_empty() => {
            let payload = base58::decode_check(s, version)?;
            let bytes = match payload.as_slice() {
                [HASH_PAYLOAD_VERSION, rest @ ..] if rest.len() == FIELD_BYTES => rest,
                bytes => bytes,
            };
            Ok(FieldElement::from_le_bytes(bytes)?)
        }
        other => encode_field(other),
    }
}

/// Token identifier; null is token 0.
pub fn encode_token_id(value: &Tree) -> Result<TokenId, LeafError> {
    encode_hash_field(value, TOKEN_ID_VERSION).map(TokenId)
}

// =============================================================================
// KEYS, FLAGS & INTEGERS
// =============================================================================

/// Public key from an address string or `{ x, isOdd }`; null is the default key.
pub fn encode_public_key(value: &Tree) -> Result<PublicKey, LeafError> {
    match value {
        Tree::Null => Ok(PublicKey::default()),
        Tree::String(address) => Ok(PublicKey::Address(address.clone())),
        Tree::Object(map) => {
            let x = map.get("x").ok_or(LeafError::MissingKey("x"))?;
            let is_odd = map.get("isOdd").ok_or(LeafError::MissingKey("isOdd"))?;
            Ok(PublicKey::Point {
                x: encode_field(x)?,
                is_odd: encode_bool(is_odd)?,
            })
        }
        other => Err(wrong_shape("address string or {x, isOdd}", other)),
    }
}

/// Boolean flag.
pub fn encode_bool(value: &Tree) -> Result<bool, LeafError> {
    value.as_bool().ok_or_else(|| wrong_shape("boolean", value))
}

/// 32-bit unsigned integer.
pub fn encode_u32(value: &Tree) -> Result<u32, LeafError> {
    let digits = unsigned_digits(value)?;
    digits
        .parse::<u32>()
        .map_err(|_| LeafError::OutOfRange { value: digits, width: 32 })
}

/// 64-bit unsigned integer.
pub fn encode_u64(value: &Tree) -> Result<u64, LeafError> {
    let digits = unsigned_digits(value)?;
    digits
        .parse::<u64>()
        .map_err(|_| LeafError::OutOfRange { value: digits, width: 64 })
}

// =============================================================================
// LABELS
// =============================================================================

/// Auth requirement from its label. Unknown or empty labels resolve to `None`.
pub fn encode_auth_required(value: &Tree) -> Result<Resolved<AuthRequired>, LeafError> {
    match value {
        Tree::String(label) => Ok(match AuthRequired::from_label(label) {
            Some(auth) => Resolved::exact(auth),
            None => Resolved::fallback(AuthRequired::None, label),
        }),
        Tree::Null => Ok(Resolved::fallback(AuthRequired::None, "")),
        other => Err(wrong_shape("auth requirement label", other)),
    }
}

/// Balance-change sign. Only `Positive` is +1; anything else is -1.
pub fn encode_sign(value: &Tree) -> Result<Resolved<Sign>, LeafError> {
    match value.as_str() {
        Some("Positive") => Ok(Resolved::exact(Sign::Positive)),
        Some("Negative") => Ok(Resolved::exact(Sign::Negative)),
        Some(label) => Ok(Resolved::fallback(Sign::Negative, label)),
        None => Err(wrong_shape("sign label", value)),
    }
}

// =============================================================================
// BYTE STRINGS
// =============================================================================

/// Byte string, carried unchanged.
pub fn encode_byte_string(value: &Tree) -> Result<ByteString, LeafError> {
    value
        .as_str()
        .map(|s| ByteString(s.to_string()))
        .ok_or_else(|| wrong_shape("string", value))
}

/// Token symbol, at most six bytes.
pub fn encode_token_symbol(value: &Tree) -> Result<TokenSymbol, LeafError> {
    let bytes = encode_byte_string(value)?;
    let len = bytes.as_bytes().len();
    if len > MAX_TOKEN_SYMBOL_BYTES {
        return Err(LeafError::TooLong {
            kind: "token symbol",
            len,
            max: MAX_TOKEN_SYMBOL_BYTES,
        });
    }
    Ok(TokenSymbol(bytes))
}

/// zkApp URI.
pub fn encode_zkapp_uri(value: &Tree) -> Result<ZkappUri, LeafError> {
    encode_byte_string(value).map(ZkappUri)
}

/// Escape text for a double-quoted literal.
///
/// Backslash, quote, `\n`, `\r` and `\t` get their short escapes; other
/// control characters become `\u{XXXX}`. Everything else passes unchanged.
pub fn escape_for_embedding(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:04x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::base58::{encode_check, LEDGER_HASH_VERSION};
    use proptest::prelude::*;
    use serde_json::json;

    fn number(literal: &str) -> Tree {
        serde_json::from_str(literal).unwrap()
    }

    #[test]
    fn test_field_accepts_int_and_string() {
        assert_eq!(encode_field(&json!(7)).unwrap(), FieldElement::from(7));
        assert_eq!(encode_field(&json!("7")).unwrap(), FieldElement::from(7));
        assert_eq!(encode_field(&json!("0007")).unwrap(), FieldElement::from(7));
        assert_eq!(encode_field(&Tree::Null).unwrap(), FieldElement::zero());
    }

    #[test]
    fn test_field_rejects_other_scalars() {
        assert!(matches!(encode_field(&json!(true)), Err(LeafError::WrongShape { .. })));
        assert!(matches!(encode_field(&json!("abc")), Err(LeafError::NotAnInteger(_))));
        assert!(matches!(encode_field(&json!(-3)), Err(LeafError::Negative(_))));
        assert!(matches!(encode_field(&number("1.5")), Err(LeafError::Fractional(_))));
        assert!(matches!(encode_field(&json!([1])), Err(LeafError::WrongShape { .. })));
    }

    #[test]
    fn test_field_beyond_u64_is_exact() {
        let big = "28948022309329048855892746252171976963363056481941560715954676764349967630336";
        let from_number = encode_field(&number(big)).unwrap();
        let from_string = encode_field(&json!(big)).unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.to_decimal(), big);
    }

    #[test]
    fn test_field_modulus_rejected() {
        let p = crate::core::field::FIELD_MODULUS;
        assert!(matches!(
            encode_field(&json!(p)),
            Err(LeafError::Field(FieldError::Overflow(_)))
        ));
    }

    #[test]
    fn test_hash_field_accepts_base58() {
        let mut payload = vec![HASH_PAYLOAD_VERSION];
        payload.extend_from_slice(&FieldElement::from(99).to_le_bytes());
        let encoded = encode_check(&payload, LEDGER_HASH_VERSION);

        let value = encode_hash_field(&json!(encoded), LEDGER_HASH_VERSION).unwrap();
        assert_eq!(value, FieldElement::from(99));

        // wrong kind
        assert!(matches!(
            encode_hash_field(&json!(encoded), TOKEN_ID_VERSION),
            Err(LeafError::Base58(Base58Error::VersionMismatch { .. }))
        ));

        // decimal still accepted
        assert_eq!(
            encode_hash_field(&json!("12"), LEDGER_HASH_VERSION).unwrap(),
            FieldElement::from(12)
        );
    }

    #[test]
    fn test_default_token_id() {
        let id = encode_token_id(&json!("wSHV2S4qX9jFsLjQo8r1BsMLH2ZRKsZx6EJd1sbozGPieEC4Jf"))
            .unwrap();
        assert_eq!(id, TokenId(FieldElement::from(1)));
        assert_eq!(encode_token_id(&Tree::Null).unwrap(), TokenId::default());
    }

    #[test]
    fn test_public_key_forms() {
        let address = "B62qn8EyCTcTBPczwTSxtvHWDVygPTeiEZkYH7m5FAXbym8T7AGXf81";
        assert_eq!(
            encode_public_key(&json!(address)).unwrap(),
            PublicKey::Address(address.to_string())
        );
        assert_eq!(encode_public_key(&Tree::Null).unwrap(), PublicKey::default());
        assert_eq!(
            encode_public_key(&json!({ "x": "5", "isOdd": true })).unwrap(),
            PublicKey::Point { x: FieldElement::from(5), is_odd: true }
        );
        assert_eq!(
            encode_public_key(&json!({ "x": "5" })),
            Err(LeafError::MissingKey("isOdd"))
        );
        assert!(encode_public_key(&json!(12)).is_err());
    }

    #[test]
    fn test_integer_widths() {
        assert_eq!(encode_u32(&json!(4294967295u64)).unwrap(), u32::MAX);
        assert!(matches!(
            encode_u32(&json!("4294967296")),
            Err(LeafError::OutOfRange { width: 32, .. })
        ));
        assert_eq!(encode_u64(&json!("18446744073709551615")).unwrap(), u64::MAX);
        assert!(matches!(
            encode_u64(&number("18446744073709551616")),
            Err(LeafError::OutOfRange { width: 64, .. })
        ));
        assert!(matches!(encode_u64(&json!("-1")), Err(LeafError::Negative(_))));
        assert!(matches!(encode_u64(&Tree::Null), Err(LeafError::WrongShape { .. })));
    }

    #[test]
    fn test_bool_only_boolean() {
        assert!(encode_bool(&json!(true)).unwrap());
        assert!(encode_bool(&json!("true")).is_err());
        assert!(encode_bool(&Tree::Null).is_err());
    }

    #[test]
    fn test_auth_fallback() {
        let known = encode_auth_required(&json!("Proof")).unwrap();
        assert_eq!(known, Resolved { value: AuthRequired::Proof, unrecognised: None });

        let typo = encode_auth_required(&json!("Sigature")).unwrap();
        assert_eq!(typo.value, AuthRequired::None);
        assert_eq!(typo.unrecognised.as_deref(), Some("Sigature"));

        let empty = encode_auth_required(&json!("")).unwrap();
        assert_eq!(empty.value, AuthRequired::None);
        assert!(empty.unrecognised.is_some());

        assert!(encode_auth_required(&json!(1)).is_err());
    }

    #[test]
    fn test_sign_normalisation() {
        assert_eq!(encode_sign(&json!("Positive")).unwrap().value, Sign::Positive);

        let negative = encode_sign(&json!("Negative")).unwrap();
        assert_eq!(negative, Resolved { value: Sign::Negative, unrecognised: None });

        let odd = encode_sign(&json!("positive")).unwrap();
        assert_eq!(odd.value, Sign::Negative);
        assert_eq!(odd.unrecognised.as_deref(), Some("positive"));
    }

    #[test]
    fn test_token_symbol_limit() {
        assert_eq!(encode_token_symbol(&json!("MINA")).unwrap().0.as_str(), "MINA");
        assert_eq!(
            encode_token_symbol(&json!("TOOLONG")),
            Err(LeafError::TooLong { kind: "token symbol", len: 7, max: 6 })
        );
    }

    #[test]
    fn test_escape_for_embedding() {
        assert_eq!(escape_for_embedding(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape_for_embedding("l1\nl2\r\t"), "l1\\nl2\\r\\t");
        assert_eq!(escape_for_embedding(" \u{18};>×7Ä"), " \\u{0018};>×7Ä");
        assert_eq!(escape_for_embedding("\u{7f}"), "\\u{007f}");
    }

    proptest! {
        #[test]
        fn prop_u64_int_and_string_agree(n in any::<u64>()) {
            let from_int = encode_field(&json!(n)).unwrap();
            let from_str = encode_field(&json!(n.to_string())).unwrap();
            prop_assert_eq!(&from_int, &from_str);
            prop_assert_eq!(encode_u64(&json!(n)).unwrap(), n);
            prop_assert_eq!(encode_u64(&json!(n.to_string())).unwrap(), n);
        }
    }
}
