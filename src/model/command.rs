//! Canonical Transaction Record
//!
//! Plain structured values mirroring the fixed account-update transaction
//! schema. Built once per input document, never mutated afterwards, and
//! handed to a [`Renderer`](crate::render::Renderer).

use serde::Serialize;

use crate::core::field::FieldElement;
use crate::model::leaves::{
    ActionState, AuthRequired, BalanceChange, ByteString, Memo, NetworkId, Optional, PublicKey,
    RangeCondition, TokenId, TokenSymbol, ZkappUri, APP_STATE_LENGTH,
};

/// Eight optional field slots, absent slots kept in position.
pub type StateSlots = [Optional<FieldElement>; APP_STATE_LENGTH];

/// A transcoded document: the command plus its test-vector metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    /// Test-vector name.
    pub name: String,
    /// The transaction command.
    pub zkapp_command: ZkAppCommand,
    /// Expected hashes (canonical zero in the simple variant).
    pub expected: ExpectedHashes,
}

/// Expected commitment values carried alongside a vector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedHashes {
    /// Memo hash.
    pub memo_hash: FieldElement,
    /// Fee payer hash.
    pub fee_payer_hash: FieldElement,
    /// Account updates commitment.
    pub account_updates_commitment: FieldElement,
    /// Full commitment.
    pub full_commitment: FieldElement,
}

/// Multi-party authorization command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZkAppCommand {
    /// Pays the fee.
    pub fee_payer: FeePayer,
    /// Updates in execution order.
    pub account_updates: Vec<AccountUpdate>,
    /// Opaque encoded memo.
    pub memo: Memo,
    /// Target network.
    pub network: NetworkId,
}

// =============================================================================
// FEE PAYER
// =============================================================================

/// Fee payer with its opaque authorization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeePayer {
    /// Body.
    pub body: FeePayerBody,
    /// Opaque signature string.
    pub authorization: String,
}

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeePayerBody {
    pub public_key: PublicKey,
    pub fee: u64,
    pub valid_until: Optional<u32>,
    pub nonce: u32,
}

// =============================================================================
// ACCOUNT UPDATE
// =============================================================================

/// One authorized state/balance change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountUpdate {
    /// Body.
    pub body: AccountUpdateBody,
    /// Placeholder authorization.
    pub authorization: Authorization,
}

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdateBody {
    pub public_key: PublicKey,
    pub token_id: TokenId,
    pub update: Update,
    pub balance_change: BalanceChange,
    pub increment_nonce: bool,
    pub events: Events,
    pub actions: Actions,
    pub call_data: FieldElement,
    pub call_depth: u32,
    pub preconditions: Preconditions,
    pub use_full_commitment: bool,
    pub implicit_account_creation_fee: bool,
    pub may_use_token: MayUseToken,
    pub authorization_kind: AuthorizationKind,
}

/// Ordered list of event field vectors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Events {
    /// Outer and inner order are both significant.
    pub data: Vec<Vec<FieldElement>>,
}

/// Ordered list of action field vectors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Actions {
    /// Outer and inner order are both significant.
    pub data: Vec<Vec<FieldElement>>,
}

#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MayUseToken {
    pub parents_own_token: bool,
    pub inherit_from_parent: bool,
}

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationKind {
    pub is_signed: bool,
    pub is_proved: bool,
    pub verification_key_hash: FieldElement,
}

/// Authorization placeholder. Generated fixtures carry neither part.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Authorization {
    /// Proof.
    pub proof: Option<String>,
    /// Signature.
    pub signature: Option<String>,
}

// =============================================================================
// UPDATE BLOCK
// =============================================================================

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Update {
    pub app_state: StateSlots,
    pub delegate: Optional<PublicKey>,
    pub verification_key: Optional<VerificationKeyData>,
    pub permissions: Optional<Permissions>,
    pub zkapp_uri: Optional<ZkappUri>,
    pub token_symbol: Optional<TokenSymbol>,
    pub timing: Optional<Timing>,
    pub voting_for: Optional<FieldElement>,
}

/// Verification key blob and its hash.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VerificationKeyData {
    /// Base64 blob, carried byte for byte.
    pub data: ByteString,
    /// Hash.
    pub hash: FieldElement,
}

/// Thirteen permissioned actions.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub edit_state: AuthRequired,
    pub access: AuthRequired,
    pub send: AuthRequired,
    pub receive: AuthRequired,
    pub set_delegate: AuthRequired,
    pub set_permissions: AuthRequired,
    pub set_verification_key: SetVerificationKey,
    pub set_zkapp_uri: AuthRequired,
    pub edit_action_state: AuthRequired,
    pub set_token_symbol: AuthRequired,
    pub increment_nonce: AuthRequired,
    pub set_voting_for: AuthRequired,
    pub set_timing: AuthRequired,
}

/// Set-verification-key policy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetVerificationKey {
    /// Required authorization.
    pub auth: AuthRequired,
    /// Transaction version the policy applies to.
    pub txn_version: u32,
}

/// Vesting schedule.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    pub initial_minimum_balance: u64,
    pub cliff_time: u32,
    pub cliff_amount: u64,
    pub vesting_period: u32,
    pub vesting_increment: u64,
}

// =============================================================================
// PRECONDITIONS
// =============================================================================

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preconditions {
    pub network: NetworkPreconditions,
    pub account: AccountPreconditions,
    pub valid_while: Optional<RangeCondition<u32>>,
}

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPreconditions {
    pub snarked_ledger_hash: Optional<FieldElement>,
    pub blockchain_length: Optional<RangeCondition<u32>>,
    pub min_window_density: Optional<RangeCondition<u32>>,
    pub total_currency: Optional<RangeCondition<u64>>,
    pub global_slot_since_genesis: Optional<RangeCondition<u32>>,
    pub staking_epoch_data: EpochData,
    pub next_epoch_data: EpochData,
}

/// Consensus-epoch-scoped constraints.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpochData {
    pub ledger: EpochLedger,
    pub seed: Optional<FieldElement>,
    pub start_checkpoint: Optional<FieldElement>,
    pub lock_checkpoint: Optional<FieldElement>,
    pub epoch_length: Optional<RangeCondition<u32>>,
}

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpochLedger {
    pub hash: Optional<FieldElement>,
    pub total_currency: Optional<RangeCondition<u64>>,
}

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPreconditions {
    pub balance: Optional<RangeCondition<u64>>,
    pub nonce: Optional<RangeCondition<u32>>,
    pub receipt_chain_hash: Optional<FieldElement>,
    pub delegate: Optional<PublicKey>,
    pub state: StateSlots,
    pub action_state: Optional<ActionState>,
    pub proved_state: Optional<bool>,
    pub is_new: Optional<bool>,
}
