//! Update block: app state, keys, permissions, timing.

use crate::core::base58::STATE_HASH_VERSION;
use crate::encode::{
    encode_byte_string, encode_field, encode_hash_field, encode_public_key, encode_token_symbol,
    encode_u32, encode_u64, encode_zkapp_uri,
};
use crate::model::command::{Permissions, SetVerificationKey, Timing, Update, VerificationKeyData};
use crate::model::leaves::ByteString;

use super::node::{MapContext, Node};
use super::TranscodeError;

const UPDATE_KEYS: &[&str] = &[
    "appState",
    "delegate",
    "verificationKey",
    "permissions",
    "zkappUri",
    "tokenSymbol",
    "timing",
    "votingFor",
];

const PERMISSION_KEYS: &[&str] = &[
    "editState",
    "access",
    "send",
    "receive",
    "setDelegate",
    "setPermissions",
    "setVerificationKey",
    "setZkappUri",
    "editActionState",
    "setTokenSymbol",
    "incrementNonce",
    "setVotingFor",
    "setTiming",
];

pub(super) fn map_update(cx: &mut MapContext<'_>, node: &Node<'_>) -> Result<Update, TranscodeError> {
    node.note_extra_keys(UPDATE_KEYS);

    Ok(Update {
        app_state: cx.state_slots(&node.required("appState")?)?,
        delegate: cx.optional_leaf(node, "delegate", encode_public_key)?,
        verification_key: cx.optional_block(node, "verificationKey", |_, vk| {
            map_verification_key(vk)
        })?,
        permissions: cx.optional_block(node, "permissions", map_permissions)?,
        zkapp_uri: cx.optional_leaf(node, "zkappUri", encode_zkapp_uri)?,
        token_symbol: cx.optional_leaf(node, "tokenSymbol", encode_token_symbol)?,
        timing: cx.optional_block(node, "timing", |_, timing| map_timing(timing))?,
        voting_for: cx.optional_leaf(node, "votingFor", |v| {
            encode_hash_field(v, STATE_HASH_VERSION)
        })?,
    })
}

/// Missing `data` is empty, missing `hash` is zero.
fn map_verification_key(node: &Node<'_>) -> Result<VerificationKeyData, TranscodeError> {
    node.note_extra_keys(&["data", "hash"]);
    let data = match node.optional("data")? {
        Some(data) => data.leaf(encode_byte_string)?,
        None => ByteString::default(),
    };
    let hash = match node.optional("hash")? {
        Some(hash) => hash.leaf(encode_field)?,
        None => Default::default(),
    };
    Ok(VerificationKeyData { data, hash })
}

fn map_permissions(cx: &mut MapContext<'_>, node: &Node<'_>) -> Result<Permissions, TranscodeError> {
    node.note_extra_keys(PERMISSION_KEYS);

    let set_verification_key = match node.optional("setVerificationKey")? {
        Some(policy) => {
            policy.note_extra_keys(&["auth", "txnVersion"]);
            SetVerificationKey {
                auth: cx.auth(&policy, "auth")?,
                txn_version: match policy.optional("txnVersion")? {
                    Some(version) => version.leaf(encode_u32)?,
                    None => 0,
                },
            }
        }
        None => SetVerificationKey::default(),
    };

    Ok(Permissions {
        edit_state: cx.auth(node, "editState")?,
        access: cx.auth(node, "access")?,
        send: cx.auth(node, "send")?,
        receive: cx.auth(node, "receive")?,
        set_delegate: cx.auth(node, "setDelegate")?,
        set_permissions: cx.auth(node, "setPermissions")?,
        set_verification_key,
        set_zkapp_uri: cx.auth(node, "setZkappUri")?,
        edit_action_state: cx.auth(node, "editActionState")?,
        set_token_symbol: cx.auth(node, "setTokenSymbol")?,
        increment_nonce: cx.auth(node, "incrementNonce")?,
        set_voting_for: cx.auth(node, "setVotingFor")?,
        set_timing: cx.auth(node, "setTiming")?,
    })
}

/// All five fields are required once timing is given.
fn map_timing(node: &Node<'_>) -> Result<Timing, TranscodeError> {
    node.note_extra_keys(&[
        "initialMinimumBalance",
        "cliffTime",
        "cliffAmount",
        "vestingPeriod",
        "vestingIncrement",
    ]);
    Ok(Timing {
        initial_minimum_balance: node.required_leaf("initialMinimumBalance", encode_u64)?,
        cliff_time: node.required_leaf("cliffTime", encode_u32)?,
        cliff_amount: node.required_leaf("cliffAmount", encode_u64)?,
        vesting_period: node.required_leaf("vestingPeriod", encode_u32)?,
        vesting_increment: node.required_leaf("vestingIncrement", encode_u64)?,
    })
}
