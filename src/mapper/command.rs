//! Root and fee payer.

use tracing::info;

use crate::config::SchemaVariant;
use crate::core::field::FieldElement;
use crate::encode::{encode_byte_string, encode_field, encode_public_key, encode_u32, encode_u64};
use crate::model::command::{CanonicalRecord, ExpectedHashes, FeePayer, FeePayerBody, ZkAppCommand};
use crate::model::leaves::Memo;

use super::account_update::map_account_update;
use super::node::{MapContext, Node};
use super::TranscodeError;

const ROOT_KEYS: &[&str] = &[
    "feePayer",
    "accountUpdates",
    "memo",
    "expectedMemoHash",
    "expectedFeePayerHash",
    "expectedAccountUpdatesCommitment",
    "expectedFullCommitment",
];

pub(super) fn map_record(
    cx: &mut MapContext<'_>,
    root: &Node<'_>,
) -> Result<CanonicalRecord, TranscodeError> {
    root.note_extra_keys(ROOT_KEYS);

    let fee_payer = map_fee_payer(cx, &root.required("feePayer")?)?;
    let account_updates = root
        .required("accountUpdates")?
        .list()?
        .iter()
        .map(|update| map_account_update(cx, update))
        .collect::<Result<Vec<_>, _>>()?;
    let memo = root.required_leaf("memo", |v| encode_byte_string(v).map(|s| Memo(s.0)))?;

    let config = cx.config();
    let expected = match config.variant {
        SchemaVariant::Proper => map_expected(root)?,
        SchemaVariant::Simple => ExpectedHashes::default(),
    };

    info!(
        name = %config.name,
        variant = %config.variant,
        updates = account_updates.len(),
        "transcoded zkApp command"
    );

    Ok(CanonicalRecord {
        name: config.name.clone(),
        zkapp_command: ZkAppCommand {
            fee_payer,
            account_updates,
            memo,
            network: config.network(),
        },
        expected,
    })
}

fn map_expected(root: &Node<'_>) -> Result<ExpectedHashes, TranscodeError> {
    let hash = |key: &'static str| -> Result<FieldElement, TranscodeError> {
        match root.optional(key)? {
            Some(node) => node.leaf(encode_field),
            None => Ok(FieldElement::zero()),
        }
    };
    Ok(ExpectedHashes {
        memo_hash: hash("expectedMemoHash")?,
        fee_payer_hash: hash("expectedFeePayerHash")?,
        account_updates_commitment: hash("expectedAccountUpdatesCommitment")?,
        full_commitment: hash("expectedFullCommitment")?,
    })
}

fn map_fee_payer(cx: &mut MapContext<'_>, node: &Node<'_>) -> Result<FeePayer, TranscodeError> {
    node.note_extra_keys(&["body", "authorization"]);
    let body = node.required("body")?;
    body.note_extra_keys(&["publicKey", "fee", "validUntil", "nonce"]);

    Ok(FeePayer {
        body: FeePayerBody {
            public_key: body.required_leaf("publicKey", encode_public_key)?,
            fee: body.required_leaf("fee", encode_u64)?,
            valid_until: cx.optional_leaf(&body, "validUntil", encode_u32)?,
            nonce: body.required_leaf("nonce", encode_u32)?,
        },
        authorization: node.required_leaf("authorization", encode_byte_string)?.0,
    })
}
