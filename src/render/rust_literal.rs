//! Rust Struct-Literal Renderer
//!
//! Emits a `ZkAppTestVector { .. }` literal that can be pasted into a test
//! vector table. Arbitrary-precision values go through `Fp::from_str("..")`
//! so no digit is lost; 32/64-bit values are plain integer literals.
//!
//! ```text
//! Optional (tagged)   None | Some(v)
//! Optional (flagged)  Flagged { is_some: b, value: v }
//! field element       Field(Fp::from_str("n").unwrap())
//! byte string         "escaped".as_bytes().to_vec()
//! ```

use crate::core::field::FieldElement;
use crate::model::command::{
    AccountPreconditions, AccountUpdate, CanonicalRecord, EpochData, FeePayer,
    NetworkPreconditions, Permissions, Timing, Update, VerificationKeyData,
};
use crate::model::leaves::{
    AuthRequired, ByteString, NetworkId, Optional, PublicKey, RangeCondition,
};

use super::{RenderError, Renderer};

const INDENT: &str = "    ";

/// Renders records as Rust struct literals.
#[derive(Clone, Copy, Debug, Default)]
pub struct RustLiteralRenderer;

impl Renderer for RustLiteralRenderer {
    fn render(&self, record: &CanonicalRecord) -> Result<String, RenderError> {
        let mut lit = Literal::default();
        lit.vector(record);
        Ok(lit.out)
    }
}

// =============================================================================
// INLINE VALUES
// =============================================================================

fn field(value: &FieldElement) -> String {
    format!("Field(Fp::from_str(\"{value}\").unwrap())")
}

fn quoted(bytes: &ByteString) -> String {
    format!("\"{}\"", bytes.escaped())
}

fn public_key(key: &PublicKey) -> String {
    match key {
        PublicKey::Address(address) => format!(
            "PublicKey(CompressedPubKey::from_address({}).unwrap())",
            quoted(&ByteString(address.clone()))
        ),
        PublicKey::Point { x, is_odd } => format!(
            "PublicKey(CompressedPubKey {{ x: Fp::from_str(\"{x}\").unwrap(), is_odd: {is_odd} }})"
        ),
    }
}

fn range<T: std::fmt::Display>(range: &RangeCondition<T>) -> String {
    format!("RangeCondition {{ lower: {}, upper: {} }}", range.lower, range.upper)
}

fn optional<T>(value: &Optional<T>, inner: impl Fn(&T) -> String) -> String {
    match value {
        Optional::Tagged(Some(v)) => format!("Some({})", inner(v)),
        Optional::Tagged(None) => "None".to_string(),
        Optional::Flagged { is_some, value } => {
            format!("Flagged {{ is_some: {is_some}, value: {} }}", inner(value))
        }
    }
}

fn slots(values: &[Optional<FieldElement>]) -> String {
    let items: Vec<String> = values.iter().map(|slot| optional(slot, field)).collect();
    format!("[{}]", items.join(", "))
}

fn field_vectors(vectors: &[Vec<FieldElement>]) -> Vec<String> {
    vectors
        .iter()
        .map(|vector| {
            let items: Vec<String> = vector.iter().map(field).collect();
            format!("vec![{}]", items.join(", "))
        })
        .collect()
}

fn network(network: NetworkId) -> &'static str {
    match network {
        NetworkId::Mainnet => "NetworkId::MAINNET",
        NetworkId::Testnet => "NetworkId::TESTNET",
    }
}

// =============================================================================
// BLOCK WRITER
// =============================================================================

#[derive(Default)]
struct Literal {
    out: String,
    depth: usize,
}

impl Literal {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn field(&mut self, key: &str, value: impl AsRef<str>) {
        self.line(&format!("{key}: {},", value.as_ref()));
    }

    fn open(&mut self, head: &str) {
        self.line(&format!("{head} {{"));
        self.depth += 1;
    }

    fn close(&mut self, tail: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("}}{tail}"));
    }

    /// A multi-line optional struct under `key`.
    fn optional_block<T>(
        &mut self,
        key: &str,
        ty: &str,
        value: &Optional<T>,
        body: impl Fn(&mut Self, &T),
    ) {
        match value {
            Optional::Tagged(None) => self.field(key, "None"),
            Optional::Tagged(Some(v)) => {
                self.open(&format!("{key}: Some({ty}"));
                body(self, v);
                self.close("),");
            }
            Optional::Flagged { is_some, value } => {
                self.open(&format!("{key}: Flagged"));
                self.field("is_some", is_some.to_string());
                self.open(&format!("value: {ty}"));
                body(self, value);
                self.close(",");
                self.close(",");
            }
        }
    }

    fn vector(&mut self, record: &CanonicalRecord) {
        let command = &record.zkapp_command;
        self.open("ZkAppTestVector");
        self.field("name", quoted(&ByteString(record.name.clone())));
        self.open("zkapp_command: ZKAppCommand");
        self.fee_payer(&command.fee_payer);
        self.line("account_updates: vec![");
        self.depth += 1;
        for (i, update) in command.account_updates.iter().enumerate() {
            self.line(&format!("// Account update {}", i + 1));
            self.account_update(update);
        }
        self.depth -= 1;
        self.line("],");
        self.field(
            "memo",
            format!("decode_memo_from_base58({})", quoted(&ByteString(command.memo.0.clone()))),
        );
        self.close(",");
        self.field("network", network(command.network));

        let expected = &record.expected;
        self.field("expected_memo_hash", format!("\"{}\"", expected.memo_hash));
        self.field("expected_fee_payer_hash", format!("\"{}\"", expected.fee_payer_hash));
        self.field(
            "expected_account_updates_commitment",
            format!("\"{}\"", expected.account_updates_commitment),
        );
        self.field("expected_full_commitment", format!("\"{}\"", expected.full_commitment));
        self.close("");
    }

    fn fee_payer(&mut self, fee_payer: &FeePayer) {
        let body = &fee_payer.body;
        self.open("fee_payer: FeePayer");
        self.open("body: FeePayerBody");
        self.field("public_key", public_key(&body.public_key));
        self.field("fee", body.fee.to_string());
        self.field("valid_until", optional(&body.valid_until, u32::to_string));
        self.field("nonce", body.nonce.to_string());
        self.close(",");
        self.field(
            "authorization",
            format!("{}.to_string()", quoted(&ByteString(fee_payer.authorization.clone()))),
        );
        self.close(",");
    }

    fn account_update(&mut self, update: &AccountUpdate) {
        let body = &update.body;
        self.open("AccountUpdate");
        self.open("body: AccountUpdateBody");
        self.field("public_key", public_key(&body.public_key));
        self.field("token_id", format!("TokenId({})", field(&body.token_id.0)));
        self.update(&body.update);

        self.open("balance_change: BalanceChange");
        self.field("magnitude", body.balance_change.magnitude.to_string());
        self.field("sgn", body.balance_change.sgn.value().to_string());
        self.close(",");

        self.field("increment_nonce", body.increment_nonce.to_string());
        self.events("events: Events", &body.events.data);
        self.events("actions: Actions", &body.actions.data);
        self.field("call_data", field(&body.call_data));
        self.field("call_depth", body.call_depth.to_string());

        self.open("preconditions: Preconditions");
        self.network_preconditions(&body.preconditions.network);
        self.account_preconditions(&body.preconditions.account);
        self.field("valid_while", optional(&body.preconditions.valid_while, range));
        self.close(",");

        self.field("use_full_commitment", body.use_full_commitment.to_string());
        self.field(
            "implicit_account_creation_fee",
            body.implicit_account_creation_fee.to_string(),
        );
        self.open("may_use_token: MayUseToken");
        self.field("parents_own_token", body.may_use_token.parents_own_token.to_string());
        self.field("inherit_from_parent", body.may_use_token.inherit_from_parent.to_string());
        self.close(",");
        self.open("authorization_kind: AuthorizationKind");
        self.field("is_signed", body.authorization_kind.is_signed.to_string());
        self.field("is_proved", body.authorization_kind.is_proved.to_string());
        self.field(
            "verification_key_hash",
            field(&body.authorization_kind.verification_key_hash),
        );
        self.close(",");
        self.close(",");

        self.open("authorization: Authorization");
        self.field("proof", "None");
        self.field("signature", "None");
        self.close(",");
        self.close(",");
    }

    fn events(&mut self, head: &str, data: &[Vec<FieldElement>]) {
        self.open(head);
        if data.is_empty() {
            self.field("data", "vec![]");
        } else {
            self.line("data: vec![");
            self.depth += 1;
            for vector in field_vectors(data) {
                self.line(&format!("{vector},"));
            }
            self.depth -= 1;
            self.line("],");
        }
        self.close(",");
    }

    fn update(&mut self, update: &Update) {
        self.open("update: Update");
        self.field("app_state", slots(&update.app_state));
        self.field("delegate", optional(&update.delegate, public_key));
        self.optional_block(
            "verification_key",
            "VerificationKeyData",
            &update.verification_key,
            |lit, vk: &VerificationKeyData| {
                lit.field("data", format!("{}.to_string()", quoted(&vk.data)));
                lit.field("hash", field(&vk.hash));
            },
        );
        self.optional_block("permissions", "Permissions", &update.permissions, Self::permissions);
        self.field(
            "zkapp_uri",
            optional(&update.zkapp_uri, |uri| {
                format!("ZkappUri({}.as_bytes().to_vec())", quoted(&uri.0))
            }),
        );
        self.field(
            "token_symbol",
            optional(&update.token_symbol, |symbol| {
                format!("TokenSymbol({}.as_bytes().to_vec())", quoted(&symbol.0))
            }),
        );
        self.optional_block("timing", "TimingData", &update.timing, |lit, timing: &Timing| {
            lit.field("initial_minimum_balance", timing.initial_minimum_balance.to_string());
            lit.field("cliff_time", timing.cliff_time.to_string());
            lit.field("cliff_amount", timing.cliff_amount.to_string());
            lit.field("vesting_period", timing.vesting_period.to_string());
            lit.field("vesting_increment", timing.vesting_increment.to_string());
        });
        self.field("voting_for", optional(&update.voting_for, field));
        self.close(",");
    }

    fn permissions(&mut self, permissions: &Permissions) {
        let auth = |level: AuthRequired| format!("AuthRequired::{}", level.label());
        self.field("edit_state", auth(permissions.edit_state));
        self.field("access", auth(permissions.access));
        self.field("send", auth(permissions.send));
        self.field("receive", auth(permissions.receive));
        self.field("set_delegate", auth(permissions.set_delegate));
        self.field("set_permissions", auth(permissions.set_permissions));
        self.open("set_verification_key: SetVerificationKey");
        self.field("auth", auth(permissions.set_verification_key.auth));
        self.field("txn_version", permissions.set_verification_key.txn_version.to_string());
        self.close(",");
        self.field("set_zkapp_uri", auth(permissions.set_zkapp_uri));
        self.field("edit_action_state", auth(permissions.edit_action_state));
        self.field("set_token_symbol", auth(permissions.set_token_symbol));
        self.field("increment_nonce", auth(permissions.increment_nonce));
        self.field("set_voting_for", auth(permissions.set_voting_for));
        self.field("set_timing", auth(permissions.set_timing));
    }

    fn network_preconditions(&mut self, network: &NetworkPreconditions) {
        self.open("network: NetworkPreconditions");
        self.field("snarked_ledger_hash", optional(&network.snarked_ledger_hash, field));
        self.field("blockchain_length", optional(&network.blockchain_length, range));
        self.field("min_window_density", optional(&network.min_window_density, range));
        self.field("total_currency", optional(&network.total_currency, range));
        self.field(
            "global_slot_since_genesis",
            optional(&network.global_slot_since_genesis, range),
        );
        self.epoch("staking_epoch_data", &network.staking_epoch_data);
        self.epoch("next_epoch_data", &network.next_epoch_data);
        self.close(",");
    }

    fn epoch(&mut self, key: &str, epoch: &EpochData) {
        self.open(&format!("{key}: EpochData"));
        self.open("ledger: EpochLedger");
        self.field("hash", optional(&epoch.ledger.hash, field));
        self.field("total_currency", optional(&epoch.ledger.total_currency, range));
        self.close(",");
        self.field("seed", optional(&epoch.seed, field));
        self.field("start_checkpoint", optional(&epoch.start_checkpoint, field));
        self.field("lock_checkpoint", optional(&epoch.lock_checkpoint, field));
        self.field("epoch_length", optional(&epoch.epoch_length, range));
        self.close(",");
    }

    fn account_preconditions(&mut self, account: &AccountPreconditions) {
        self.open("account: AccountPreconditions");
        self.field("balance", optional(&account.balance, range));
        self.field("nonce", optional(&account.nonce, range));
        self.field("receipt_chain_hash", optional(&account.receipt_chain_hash, field));
        self.field("delegate", optional(&account.delegate, public_key));
        self.field("state", slots(&account.state));
        self.field(
            "action_state",
            optional(&account.action_state, |state| format!("ActionState({})", field(&state.0))),
        );
        self.field("proved_state", optional(&account.proved_state, bool::to_string));
        self.field("is_new", optional(&account.is_new, bool::to_string));
        self.close(",");
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::leaves::TokenSymbol;

    #[test]
    fn test_optional_shapes() {
        let tagged = Optional::Tagged(Some(FieldElement::from(3)));
        assert_eq!(optional(&tagged, field), "Some(Field(Fp::from_str(\"3\").unwrap()))");
        let absent: Optional<FieldElement> = Optional::Tagged(None);
        assert_eq!(optional(&absent, field), "None");

        let flagged = Optional::Flagged { is_some: false, value: 0u32 };
        assert_eq!(optional(&flagged, u32::to_string), "Flagged { is_some: false, value: 0 }");
    }

    #[test]
    fn test_public_key_literals() {
        assert_eq!(
            public_key(&PublicKey::Address("B62qabc".to_string())),
            "PublicKey(CompressedPubKey::from_address(\"B62qabc\").unwrap())"
        );
        assert_eq!(
            public_key(&PublicKey::default()),
            "PublicKey(CompressedPubKey { x: Fp::from_str(\"0\").unwrap(), is_odd: false })"
        );
    }

    #[test]
    fn test_slots_inline() {
        let mut state: [Optional<FieldElement>; 8] = std::array::from_fn(|_| Optional::Tagged(None));
        state[3] = Optional::Tagged(Some(FieldElement::from(25105)));
        assert_eq!(
            slots(&state),
            "[None, None, None, Some(Field(Fp::from_str(\"25105\").unwrap())), None, None, None, None]"
        );
    }

    #[test]
    fn test_byte_strings_escaped() {
        let symbol = TokenSymbol(ByteString("a\"b".to_string()));
        let text = optional(&Optional::Tagged(Some(symbol)), |s| {
            format!("TokenSymbol({}.as_bytes().to_vec())", quoted(&s.0))
        });
        assert_eq!(text, "Some(TokenSymbol(\"a\\\"b\".as_bytes().to_vec()))");
    }

    #[test]
    fn test_range_literal() {
        let r = RangeCondition { lower: 0u64, upper: u64::MAX };
        assert_eq!(range(&r), "RangeCondition { lower: 0, upper: 18446744073709551615 }");
    }

    #[test]
    fn test_block_indentation() {
        let mut lit = Literal::default();
        lit.open("Outer");
        lit.field("a", "1");
        lit.open("inner: Inner");
        lit.field("b", "2");
        lit.close(",");
        lit.close("");
        assert_eq!(lit.out, "Outer {\n    a: 1,\n    inner: Inner {\n        b: 2,\n    },\n}\n");
    }
}
