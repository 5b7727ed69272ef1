//! Optional-value strategy.
//!
//! The shape of every [`Optional`] in a record is chosen once per transcode
//! and passed down to each call site. A flagged absent value needs a payload,
//! which comes from [`Emptiable`].

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::Serialize;

use crate::config::ConfigError;
use crate::core::field::FieldElement;
use crate::input::Tree;
use crate::model::command::{Permissions, SetVerificationKey, Timing, VerificationKeyData};
use crate::model::leaves::{
    ActionState, AuthRequired, ByteString, Optional, PublicKey, RangeCondition, TokenSymbol,
    ZkappUri,
};

/// Hash of an empty action-state sequence.
pub const EMPTY_ACTION_STATE: &str =
    "25079927036070901246064867767436987657692091363973573142121686150614948079097";

/// Transaction version carried by flagged default permissions.
pub const DEFAULT_TXN_VERSION: u32 = 3;

/// How absent values appear in the canonical record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionalShape {
    /// Absence is a tag; nothing is materialised.
    #[default]
    Tagged,
    /// Presence flag beside an always-materialised payload.
    Flagged,
}

impl OptionalShape {
    /// An absent value in this shape.
    pub fn absent<T: Emptiable>(self) -> Optional<T> {
        match self {
            Self::Tagged => Optional::Tagged(None),
            Self::Flagged => Optional::Flagged { is_some: false, value: T::empty() },
        }
    }

    /// A present value in this shape.
    pub fn present<T>(self, value: T) -> Optional<T> {
        match self {
            Self::Tagged => Optional::Tagged(Some(value)),
            Self::Flagged => Optional::Flagged { is_some: true, value },
        }
    }

    /// Missing or null input is absent; anything else goes through `inner`.
    pub fn wrap<'t, T, E, F>(self, input: Option<&'t Tree>, inner: F) -> Result<Optional<T>, E>
    where
        T: Emptiable,
        F: FnOnce(&'t Tree) -> Result<T, E>,
    {
        match input {
            None | Some(Tree::Null) => Ok(self.absent()),
            Some(value) => inner(value).map(|v| self.present(v)),
        }
    }
}

impl fmt::Display for OptionalShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tagged => write!(f, "tagged"),
            Self::Flagged => write!(f, "flagged"),
        }
    }
}

impl FromStr for OptionalShape {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tagged" => Ok(Self::Tagged),
            "flagged" => Ok(Self::Flagged),
            _ => Err(ConfigError::UnknownValue {
                setting: "optional shape",
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// DEFAULT PAYLOADS
// =============================================================================

/// Payload materialised for a flagged absent value.
pub trait Emptiable {
    /// The default payload.
    fn empty() -> Self;
}

impl Emptiable for FieldElement {
    fn empty() -> Self {
        FieldElement::zero()
    }
}

impl Emptiable for bool {
    fn empty() -> Self {
        false
    }
}

impl Emptiable for u32 {
    fn empty() -> Self {
        0
    }
}

impl Emptiable for PublicKey {
    fn empty() -> Self {
        PublicKey::default()
    }
}

impl Emptiable for RangeCondition<u32> {
    fn empty() -> Self {
        RangeCondition { lower: 0, upper: u32::MAX }
    }
}

impl Emptiable for RangeCondition<u64> {
    fn empty() -> Self {
        RangeCondition { lower: 0, upper: u64::MAX }
    }
}

fn empty_action_state() -> &'static FieldElement {
    static EMPTY: OnceLock<FieldElement> = OnceLock::new();
    EMPTY.get_or_init(|| {
        FieldElement::from_decimal(EMPTY_ACTION_STATE)
            .expect("empty action state is a canonical field element")
    })
}

impl Emptiable for ActionState {
    fn empty() -> Self {
        ActionState(empty_action_state().clone())
    }
}

impl Emptiable for VerificationKeyData {
    fn empty() -> Self {
        VerificationKeyData::default()
    }
}

impl Emptiable for Permissions {
    fn empty() -> Self {
        Permissions {
            set_verification_key: SetVerificationKey {
                auth: AuthRequired::None,
                txn_version: DEFAULT_TXN_VERSION,
            },
            ..Permissions::default()
        }
    }
}

impl Emptiable for TokenSymbol {
    fn empty() -> Self {
        TokenSymbol(ByteString::default())
    }
}

impl Emptiable for ZkappUri {
    fn empty() -> Self {
        ZkappUri(ByteString::default())
    }
}

impl Emptiable for Timing {
    fn empty() -> Self {
        Timing::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shape_parse() {
        assert_eq!("tagged".parse::<OptionalShape>().unwrap(), OptionalShape::Tagged);
        assert_eq!("Flagged".parse::<OptionalShape>().unwrap(), OptionalShape::Flagged);
        assert!("both".parse::<OptionalShape>().is_err());
    }

    #[test]
    fn test_wrap_tagged() {
        let shape = OptionalShape::Tagged;
        let absent: Optional<bool> =
            shape.wrap(None, |v| v.as_bool().ok_or(())).unwrap();
        assert_eq!(absent, Optional::Tagged(None));

        let null = json!(null);
        let absent: Optional<bool> =
            shape.wrap(Some(&null), |v| v.as_bool().ok_or(())).unwrap();
        assert!(!absent.is_present());

        let yes = json!(true);
        let present = shape.wrap(Some(&yes), |v| v.as_bool().ok_or(())).unwrap();
        assert_eq!(present, Optional::Tagged(Some(true)));
    }

    #[test]
    fn test_wrap_flagged_materialises_default() {
        let shape = OptionalShape::Flagged;
        let range: Optional<RangeCondition<u32>> = shape.absent();
        assert_eq!(
            range,
            Optional::Flagged {
                is_some: false,
                value: RangeCondition { lower: 0, upper: u32::MAX },
            }
        );

        let permissions: Optional<Permissions> = shape.absent();
        match permissions {
            Optional::Flagged { is_some: false, value } => {
                assert_eq!(value.set_verification_key.txn_version, DEFAULT_TXN_VERSION);
                assert_eq!(value.send, AuthRequired::None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_wrap_propagates_inner_error() {
        let bad = json!("x");
        let result: Result<Optional<bool>, &str> =
            OptionalShape::Tagged.wrap(Some(&bad), |_| Err("nope"));
        assert_eq!(result, Err("nope"));
    }

    #[test]
    fn test_empty_action_state_is_canonical() {
        assert_eq!(ActionState::empty().0.to_decimal(), EMPTY_ACTION_STATE);
    }
}
