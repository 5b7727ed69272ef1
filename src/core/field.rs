//! Canonical Field Elements
//!
//! Field elements of the Pallas base field, kept as exact arbitrary-precision
//! integers. No floating-point intermediate is ever involved: inputs arrive as
//! native integers or decimal strings and are parsed digit by digit.
//!
//! ## Canonical Form
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  "0042"  ─┐                                                 │
//! │    42    ─┼──►  FieldElement(42)  ──►  "42"                 │
//! │  "42"    ─┘                                                 │
//! │                                                             │
//! │  Range: 0 ≤ x < p                                           │
//! │  p = 2^254 + 45560315531419706090280762371685220353         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::sync::OnceLock;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Serialize, Serializer};

/// Pallas base-field modulus, decimal.
pub const FIELD_MODULUS: &str =
    "28948022309329048855892746252171976963363056481941560715954676764349967630337";

/// Byte length of a little-endian field payload.
pub const FIELD_BYTES: usize = 32;

fn modulus() -> &'static BigUint {
    static MODULUS: OnceLock<BigUint> = OnceLock::new();
    MODULUS.get_or_init(|| {
        BigUint::parse_bytes(FIELD_MODULUS.as_bytes(), 10)
            .expect("field modulus is a decimal constant")
    })
}

/// Why a value could not become a field element.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Input contained something other than ASCII digits.
    #[error("'{0}' is not a decimal integer")]
    NotDecimal(String),

    /// Value is not below the field modulus.
    #[error("value {0} is not below the field modulus")]
    Overflow(String),

    /// Byte payload had the wrong length.
    #[error("field payload must be {FIELD_BYTES} bytes, got {0}")]
    BadPayloadLength(usize),
}

/// A canonical field element (`0 ≤ x < p`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldElement(BigUint);

impl FieldElement {
    /// Canonical zero.
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Parse a decimal digit string. Leading zeros are accepted and dropped.
    pub fn from_decimal(digits: &str) -> Result<Self, FieldError> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FieldError::NotDecimal(digits.to_string()));
        }
        let value = BigUint::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| FieldError::NotDecimal(digits.to_string()))?;
        Self::from_biguint(value)
    }

    /// Wrap an integer, rejecting values at or above the modulus.
    pub fn from_biguint(value: BigUint) -> Result<Self, FieldError> {
        if &value >= modulus() {
            return Err(FieldError::Overflow(value.to_str_radix(10)));
        }
        Ok(Self(value))
    }

    /// Decode a 32-byte little-endian payload.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, FieldError> {
        if bytes.len() != FIELD_BYTES {
            return Err(FieldError::BadPayloadLength(bytes.len()));
        }
        Self::from_biguint(BigUint::from_bytes_le(bytes))
    }

    /// Little-endian encoding padded to 32 bytes.
    pub fn to_le_bytes(&self) -> [u8; FIELD_BYTES] {
        let mut out = [0u8; FIELD_BYTES];
        let bytes = self.0.to_bytes_le();
        out[..bytes.len()].copy_from_slice(&bytes);
        out
    }

    /// Decimal representation without leading zeros.
    pub fn to_decimal(&self) -> String {
        self.0.to_str_radix(10)
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        // every u64 is far below p
        Self(BigUint::from(value))
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_leading_zeros_normalised() {
        let a = FieldElement::from_decimal("0042").unwrap();
        let b = FieldElement::from(42u64);
        assert_eq!(a, b);
        assert_eq!(a.to_decimal(), "42");
    }

    #[test]
    fn test_modulus_boundary() {
        let p_minus_one =
            "28948022309329048855892746252171976963363056481941560715954676764349967630336";
        assert!(FieldElement::from_decimal(p_minus_one).is_ok());
        assert!(matches!(
            FieldElement::from_decimal(FIELD_MODULUS),
            Err(FieldError::Overflow(_))
        ));
    }

    #[test]
    fn test_rejects_non_decimal() {
        assert!(FieldElement::from_decimal("").is_err());
        assert!(FieldElement::from_decimal("-1").is_err());
        assert!(FieldElement::from_decimal("1.5").is_err());
        assert!(FieldElement::from_decimal("0x10").is_err());
    }

    #[test]
    fn test_le_bytes() {
        let mut payload = [0u8; 32];
        payload[0] = 1;
        assert_eq!(FieldElement::from_le_bytes(&payload).unwrap(), FieldElement::from(1));

        let sevens = FieldElement::from(0x0707u64);
        assert_eq!(FieldElement::from_le_bytes(&sevens.to_le_bytes()).unwrap(), sevens);

        assert_eq!(
            FieldElement::from_le_bytes(&[0u8; 31]),
            Err(FieldError::BadPayloadLength(31))
        );
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let json = serde_json::to_string(&FieldElement::from(u64::MAX)).unwrap();
        assert_eq!(json, "\"18446744073709551615\"");
    }

    proptest! {
        #[test]
        fn test_integer_and_string_forms_agree(n in any::<u64>()) {
            let from_int = FieldElement::from(n);
            let from_str = FieldElement::from_decimal(&n.to_string()).unwrap();
            prop_assert_eq!(from_int, from_str);
        }
    }
}
