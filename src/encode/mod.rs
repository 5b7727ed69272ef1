//! Leaf encoders.
//!
//! - `leaf`: one encoder per terminal value kind
//! - `optional`: the optional-value shape strategy and default payloads

pub mod leaf;
pub mod optional;

pub use leaf::{
    encode_auth_required, encode_bool, encode_byte_string, encode_field, encode_hash_field,
    encode_public_key, encode_sign, encode_token_id, encode_token_symbol, encode_u32,
    encode_u64, encode_zkapp_uri, escape_for_embedding, LeafError, Resolved,
};
pub use optional::{Emptiable, OptionalShape, EMPTY_ACTION_STATE};
