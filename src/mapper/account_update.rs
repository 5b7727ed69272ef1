//! Account updates.

use crate::core::field::FieldElement;
use crate::encode::{encode_bool, encode_field, encode_public_key, encode_token_id, encode_u32, encode_u64};
use crate::model::command::{
    AccountUpdate, AccountUpdateBody, Actions, Authorization, AuthorizationKind, Events,
    MayUseToken,
};
use crate::model::leaves::BalanceChange;

use super::node::{MapContext, Node};
use super::preconditions::map_preconditions;
use super::update::map_update;
use super::TranscodeError;

const BODY_KEYS: &[&str] = &[
    "publicKey",
    "tokenId",
    "update",
    "balanceChange",
    "incrementNonce",
    "events",
    "actions",
    "callData",
    "callDepth",
    "preconditions",
    "useFullCommitment",
    "implicitAccountCreationFee",
    "mayUseToken",
    "authorizationKind",
];

pub(super) fn map_account_update(
    cx: &mut MapContext<'_>,
    node: &Node<'_>,
) -> Result<AccountUpdate, TranscodeError> {
    node.note_extra_keys(&["body", "authorization"]);
    let body = node.required("body")?;
    body.note_extra_keys(BODY_KEYS);

    let balance = body.required("balanceChange")?;
    balance.note_extra_keys(&["magnitude", "sgn"]);
    let balance_change = BalanceChange {
        magnitude: balance.required_leaf("magnitude", encode_u64)?,
        sgn: cx.sign(&balance.required("sgn")?)?,
    };

    let may_use = body.required("mayUseToken")?;
    may_use.note_extra_keys(&["parentsOwnToken", "inheritFromParent"]);
    let kind = body.required("authorizationKind")?;
    kind.note_extra_keys(&["isSigned", "isProved", "verificationKeyHash"]);

    Ok(AccountUpdate {
        body: AccountUpdateBody {
            public_key: body.required_leaf("publicKey", encode_public_key)?,
            token_id: body.required_leaf("tokenId", encode_token_id)?,
            update: map_update(cx, &body.required("update")?)?,
            balance_change,
            increment_nonce: body.required_leaf("incrementNonce", encode_bool)?,
            events: Events { data: field_vectors(&body.required("events")?)? },
            actions: Actions { data: field_vectors(&body.required("actions")?)? },
            call_data: body.required_leaf("callData", encode_field)?,
            call_depth: body.required_leaf("callDepth", encode_u32)?,
            preconditions: map_preconditions(cx, &body.required("preconditions")?)?,
            use_full_commitment: body.required_leaf("useFullCommitment", encode_bool)?,
            implicit_account_creation_fee: body
                .required_leaf("implicitAccountCreationFee", encode_bool)?,
            may_use_token: MayUseToken {
                parents_own_token: may_use.required_leaf("parentsOwnToken", encode_bool)?,
                inherit_from_parent: may_use.required_leaf("inheritFromParent", encode_bool)?,
            },
            authorization_kind: AuthorizationKind {
                is_signed: kind.required_leaf("isSigned", encode_bool)?,
                is_proved: kind.required_leaf("isProved", encode_bool)?,
                verification_key_hash: kind.required_leaf("verificationKeyHash", encode_field)?,
            },
        },
        authorization: Authorization::default(),
    })
}

/// Events/actions: a list of field vectors, both levels in input order.
fn field_vectors(node: &Node<'_>) -> Result<Vec<Vec<FieldElement>>, TranscodeError> {
    node.list()?
        .iter()
        .map(|vector| {
            vector
                .list()?
                .iter()
                .map(|field| field.leaf(encode_field))
                .collect()
        })
        .collect()
}
