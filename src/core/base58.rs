//! Base58check Codec
//!
//! Mina encodes hashes, token ids and memos as
//! `base58(version_byte || payload || checksum)` where the checksum is the
//! first four bytes of `SHA256(SHA256(version_byte || payload))`.

use sha2::{Digest, Sha256};

/// Version byte for ledger hashes.
pub const LEDGER_HASH_VERSION: u8 = 5;

/// Version byte for receipt chain hashes.
pub const RECEIPT_CHAIN_HASH_VERSION: u8 = 12;

/// Version byte for epoch seeds.
pub const EPOCH_SEED_VERSION: u8 = 13;

/// Version byte for protocol state hashes.
pub const STATE_HASH_VERSION: u8 = 16;

/// Version byte for user command memos.
pub const MEMO_VERSION: u8 = 20;

/// Version byte for token ids.
pub const TOKEN_ID_VERSION: u8 = 28;

const CHECKSUM_LEN: usize = 4;

/// Base58check failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Base58Error {
    /// Characters outside the base58 alphabet.
    #[error("invalid base58 encoding")]
    InvalidBase58,

    /// Too few bytes for a version byte and checksum.
    #[error("input too short for base58check")]
    TooShort,

    /// Wrong version byte for the expected kind.
    #[error("version byte mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Version byte the caller asked for.
        expected: u8,
        /// Version byte present in the input.
        found: u8,
    },

    /// Checksum did not verify.
    #[error("base58check checksum mismatch")]
    ChecksumMismatch,
}

fn checksum(bytes: &[u8]) -> [u8; CHECKSUM_LEN] {
    let once = Sha256::digest(bytes);
    let twice = Sha256::digest(once);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&twice[..CHECKSUM_LEN]);
    out
}

/// Encode `payload` under `version`.
pub fn encode_check(payload: &[u8], version: u8) -> String {
    let mut bytes = Vec::with_capacity(1 + payload.len() + CHECKSUM_LEN);
    bytes.push(version);
    bytes.extend_from_slice(payload);
    let sum = checksum(&bytes);
    bytes.extend_from_slice(&sum);
    bs58::encode(bytes).into_string()
}

/// Decode and verify, returning the payload without version byte or checksum.
pub fn decode_check(input: &str, version: u8) -> Result<Vec<u8>, Base58Error> {
    let bytes = bs58::decode(input)
        .into_vec()
        .map_err(|_| Base58Error::InvalidBase58)?;

    if bytes.len() < 1 + CHECKSUM_LEN {
        return Err(Base58Error::TooShort);
    }
    if bytes[0] != version {
        return Err(Base58Error::VersionMismatch {
            expected: version,
            found: bytes[0],
        });
    }

    let (body, sum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    if checksum(body) != sum {
        return Err(Base58Error::ChecksumMismatch);
    }

    Ok(body[1..].to_vec())
}

// =============================================================================
// TESTS
// =============================================================================
