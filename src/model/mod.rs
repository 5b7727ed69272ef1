//! Canonical record model.
//!
//! - `leaves`: terminal value types (keys, auth levels, optionals, ranges)
//! - `command`: the nested transaction records

pub mod leaves;
pub mod command;

pub use leaves::{
    ActionState, AuthRequired, BalanceChange, ByteString, Memo, MemoError, NetworkId, Optional,
    PublicKey, RangeCondition, Sign, TokenId, TokenSymbol, ZkappUri, APP_STATE_LENGTH,
};
pub use command::{
    AccountPreconditions, AccountUpdate, AccountUpdateBody, Actions, Authorization,
    AuthorizationKind, CanonicalRecord, EpochData, EpochLedger, Events, ExpectedHashes, FeePayer,
    FeePayerBody, MayUseToken, NetworkPreconditions, Permissions, Preconditions,
    SetVerificationKey, StateSlots, Timing, Update, VerificationKeyData, ZkAppCommand,
};
