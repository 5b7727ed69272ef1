//! Network and account preconditions.

use crate::core::base58::{
    EPOCH_SEED_VERSION, LEDGER_HASH_VERSION, RECEIPT_CHAIN_HASH_VERSION, STATE_HASH_VERSION,
};
use crate::encode::{encode_bool, encode_field, encode_hash_field, encode_public_key, encode_u32, encode_u64};
use crate::model::command::{
    AccountPreconditions, EpochData, EpochLedger, NetworkPreconditions, Preconditions,
};
use crate::model::leaves::ActionState;

use super::node::{MapContext, Node};
use super::TranscodeError;

pub(super) fn map_preconditions(
    cx: &mut MapContext<'_>,
    node: &Node<'_>,
) -> Result<Preconditions, TranscodeError> {
    node.note_extra_keys(&["network", "account", "validWhile"]);
    Ok(Preconditions {
        network: map_network(cx, &node.required("network")?)?,
        account: map_account(cx, &node.required("account")?)?,
        valid_while: cx.optional_range(node, "validWhile", encode_u32)?,
    })
}

fn map_network(
    cx: &mut MapContext<'_>,
    node: &Node<'_>,
) -> Result<NetworkPreconditions, TranscodeError> {
    node.note_extra_keys(&[
        "snarkedLedgerHash",
        "blockchainLength",
        "minWindowDensity",
        "totalCurrency",
        "globalSlotSinceGenesis",
        "stakingEpochData",
        "nextEpochData",
    ]);
    Ok(NetworkPreconditions {
        snarked_ledger_hash: cx.optional_leaf(node, "snarkedLedgerHash", |v| {
            encode_hash_field(v, LEDGER_HASH_VERSION)
        })?,
        blockchain_length: cx.optional_range(node, "blockchainLength", encode_u32)?,
        min_window_density: cx.optional_range(node, "minWindowDensity", encode_u32)?,
        total_currency: cx.optional_range(node, "totalCurrency", encode_u64)?,
        global_slot_since_genesis: cx.optional_range(node, "globalSlotSinceGenesis", encode_u32)?,
        staking_epoch_data: map_epoch(cx, &node.required("stakingEpochData")?)?,
        next_epoch_data: map_epoch(cx, &node.required("nextEpochData")?)?,
    })
}

fn map_epoch(cx: &mut MapContext<'_>, node: &Node<'_>) -> Result<EpochData, TranscodeError> {
    node.note_extra_keys(&["ledger", "seed", "startCheckpoint", "lockCheckpoint", "epochLength"]);

    let ledger = match node.optional("ledger")? {
        Some(ledger) => {
            ledger.note_extra_keys(&["hash", "totalCurrency"]);
            EpochLedger {
                hash: cx.optional_leaf(&ledger, "hash", |v| {
                    encode_hash_field(v, LEDGER_HASH_VERSION)
                })?,
                total_currency: cx.optional_range(&ledger, "totalCurrency", encode_u64)?,
            }
        }
        None => EpochLedger {
            hash: cx.shape().absent(),
            total_currency: cx.shape().absent(),
        },
    };

    Ok(EpochData {
        ledger,
        seed: cx.optional_leaf(node, "seed", |v| encode_hash_field(v, EPOCH_SEED_VERSION))?,
        start_checkpoint: cx.optional_leaf(node, "startCheckpoint", |v| {
            encode_hash_field(v, STATE_HASH_VERSION)
        })?,
        lock_checkpoint: cx.optional_leaf(node, "lockCheckpoint", |v| {
            encode_hash_field(v, STATE_HASH_VERSION)
        })?,
        epoch_length: cx.optional_range(node, "epochLength", encode_u32)?,
    })
}

fn map_account(
    cx: &mut MapContext<'_>,
    node: &Node<'_>,
) -> Result<AccountPreconditions, TranscodeError> {
    node.note_extra_keys(&[
        "balance",
        "nonce",
        "receiptChainHash",
        "delegate",
        "state",
        "actionState",
        "provedState",
        "isNew",
    ]);
    Ok(AccountPreconditions {
        balance: cx.optional_range(node, "balance", encode_u64)?,
        nonce: cx.optional_range(node, "nonce", encode_u32)?,
        receipt_chain_hash: cx.optional_leaf(node, "receiptChainHash", |v| {
            encode_hash_field(v, RECEIPT_CHAIN_HASH_VERSION)
        })?,
        delegate: cx.optional_leaf(node, "delegate", encode_public_key)?,
        state: cx.state_slots(&node.required("state")?)?,
        action_state: cx.optional_leaf(node, "actionState", |v| encode_field(v).map(ActionState))?,
        proved_state: cx.optional_leaf(node, "provedState", encode_bool)?,
        is_new: cx.optional_leaf(node, "isNew", encode_bool)?,
    })
}
