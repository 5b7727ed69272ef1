//! Leaf Types of the Canonical Record
//!
//! Every terminal value of the transaction schema has one type here. Decimal
//! integers are never stored as floats; field elements are exact.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::core::base58::{self, Base58Error, MEMO_VERSION};
use crate::core::field::FieldElement;
use crate::encode::leaf::escape_for_embedding;

/// Number of app-state / account-state slots.
pub const APP_STATE_LENGTH: usize = 8;

/// Raw memo length after base58check decoding.
pub const MEMO_BYTES: usize = 34;

/// Maximum token symbol length in bytes.
pub const MAX_TOKEN_SYMBOL_BYTES: usize = 6;

// =============================================================================
// KEYS & IDENTIFIERS
// =============================================================================

/// Public key, either in address form or as a compressed curve point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PublicKey {
    /// Address-form string, passed through unchanged.
    Address(String),

    /// Compressed point.
    #[serde(rename_all = "camelCase")]
    Point {
        /// x-coordinate.
        x: FieldElement,
        /// Parity of the y-coordinate.
        is_odd: bool,
    },
}

impl Default for PublicKey {
    /// The empty key `{ x: 0, isOdd: false }`.
    fn default() -> Self {
        Self::Point {
            x: FieldElement::zero(),
            is_odd: false,
        }
    }
}

/// Token identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenId(pub FieldElement);

/// Action-state hash.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActionState(pub FieldElement);

/// Target network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// Production network.
    Mainnet,
    /// Test network.
    Testnet,
}

// =============================================================================
// PERMISSIONS
// =============================================================================

/// Authorization policy level for a permissioned action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum AuthRequired {
    /// No authorization needed.
    #[default]
    None,
    /// Signature or proof.
    Either,
    /// Proof only.
    Proof,
    /// Signature only.
    Signature,
    /// Never allowed.
    Impossible,
    /// Signature and proof (legacy).
    Both,
}

impl AuthRequired {
    /// All levels, in declaration order.
    pub const ALL: [AuthRequired; 6] = [
        Self::None,
        Self::Either,
        Self::Proof,
        Self::Signature,
        Self::Impossible,
        Self::Both,
    ];

    /// Look up a known label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|auth| auth.label() == label)
    }

    /// Source label of this level.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Either => "Either",
            Self::Proof => "Proof",
            Self::Signature => "Signature",
            Self::Impossible => "Impossible",
            Self::Both => "Both",
        }
    }
}

// =============================================================================
// OPTIONAL VALUES & RANGES
// =============================================================================

/// A value that may be absent.
///
/// Two shapes exist; which one is produced is fixed for a whole transcode by
/// [`OptionalShape`](crate::encode::OptionalShape):
/// - `Tagged`: absence is the tag itself, nothing else is materialised.
/// - `Flagged`: a presence flag sits beside an always-materialised payload,
///   which holds a default value when the flag is false.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Optional<T> {
    /// Presence-tagged value.
    Tagged(Option<T>),

    /// Presence flag plus payload.
    Flagged {
        /// Whether the source carried a value.
        is_some: bool,
        /// Source value, or the default payload.
        value: T,
    },
}

impl<T> Optional<T> {
    /// True when the source carried a value.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Tagged(inner) => inner.is_some(),
            Self::Flagged { is_some, .. } => *is_some,
        }
    }

    /// The carried value; `None` when absent, even if a default is materialised.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Tagged(inner) => inner.as_ref(),
            Self::Flagged { is_some: true, value } => Some(value),
            Self::Flagged { is_some: false, .. } => None,
        }
    }
}

impl<T: Serialize> Serialize for Optional<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Tagged(Some(value)) => value.serialize(serializer),
            Self::Tagged(None) => serializer.serialize_none(),
            Self::Flagged { is_some, value } => {
                let mut state = serializer.serialize_struct("Optional", 2)?;
                state.serialize_field("isSome", is_some)?;
                state.serialize_field("value", value)?;
                state.end()
            }
        }
    }
}

/// Inclusive lower/upper bound over an unsigned integer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RangeCondition<T> {
    /// Lower bound.
    pub lower: T,
    /// Upper bound.
    pub upper: T,
}

// =============================================================================
// BALANCES
// =============================================================================

/// Sign of a balance change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Sign {
    /// +1
    #[default]
    Positive,
    /// -1
    Negative,
}

impl Sign {
    /// +1 or -1.
    pub fn value(self) -> i8 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
        }
    }
}

/// Signed balance change: unsigned magnitude and sign.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BalanceChange {
    /// Unsigned magnitude.
    pub magnitude: u64,
    /// Sign.
    pub sgn: Sign,
}

// =============================================================================
// BYTE STRINGS
// =============================================================================

/// A string carried byte for byte. Escaping happens only at render time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ByteString(pub String);

impl ByteString {
    /// Raw text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Text safe to embed inside a double-quoted literal.
    pub fn escaped(&self) -> String {
        escape_for_embedding(&self.0)
    }
}

/// Token symbol (at most 6 bytes).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenSymbol(pub ByteString);

/// zkApp URI.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ZkappUri(pub ByteString);

/// Opaque base58check-encoded memo.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Memo(pub String);

impl Memo {
    /// Encoded form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode into the raw 34 memo bytes.
    pub fn decode(&self) -> Result<[u8; MEMO_BYTES], MemoError> {
        let payload = base58::decode_check(&self.0, MEMO_VERSION)?;
        payload
            .as_slice()
            .try_into()
            .map_err(|_| MemoError::BadLength(payload.len()))
    }
}

impl fmt::Display for Memo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Memo decoding failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemoError {
    /// Not valid base58check.
    #[error("memo is not valid base58check: {0}")]
    Base58(#[from] Base58Error),

    /// Decoded to the wrong number of bytes.
    #[error("memo decoded to {0} bytes, expected {MEMO_BYTES}")]
    BadLength(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_labels_round_trip() {
        for auth in AuthRequired::ALL {
            assert_eq!(AuthRequired::from_label(auth.label()), Some(auth));
        }
        assert_eq!(AuthRequired::from_label("signature"), None);
        assert_eq!(AuthRequired::from_label(""), None);
    }

    #[test]
    fn test_optional_accessors() {
        let tagged: Optional<u32> = Optional::Tagged(Some(3));
        assert!(tagged.is_present());
        assert_eq!(tagged.value(), Some(&3));

        let flagged_absent = Optional::Flagged { is_some: false, value: 0u32 };
        assert!(!flagged_absent.is_present());
        assert_eq!(flagged_absent.value(), None);
    }

    #[test]
    fn test_optional_serialization_shapes() {
        let absent: Optional<u32> = Optional::Tagged(None);
        assert_eq!(serde_json::to_string(&absent).unwrap(), "null");

        let flagged = Optional::Flagged { is_some: true, value: 7u32 };
        assert_eq!(
            serde_json::to_string(&flagged).unwrap(),
            r#"{"isSome":true,"value":7}"#
        );
    }

    #[test]
    fn test_public_key_serialization() {
        let key = PublicKey::Address("B62qtest".to_string());
        assert_eq!(serde_json::to_string(&key).unwrap(), r#""B62qtest""#);
        assert_eq!(
            serde_json::to_string(&PublicKey::default()).unwrap(),
            r#"{"x":"0","isOdd":false}"#
        );
    }

    #[test]
    fn test_sign_values() {
        assert_eq!(Sign::Positive.value(), 1);
        assert_eq!(Sign::Negative.value(), -1);
    }

    #[test]
    fn test_memo_decode() {
        let mut raw = [0u8; MEMO_BYTES];
        raw[0] = 1;
        raw[1] = 5;
        raw[2..7].copy_from_slice(b"hello");
        let memo = Memo(base58::encode_check(&raw, MEMO_VERSION));
        assert_eq!(memo.decode().unwrap(), raw);

        let short = Memo(base58::encode_check(&raw[..10], MEMO_VERSION));
        assert_eq!(short.decode(), Err(MemoError::BadLength(10)));
    }
}
