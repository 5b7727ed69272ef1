//! Record Fingerprints
//!
//! SHA-256 over the canonical JSON form of a record, with a domain separator.
//! Two transcodes of the same input must produce the same fingerprint.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Domain separator for record fingerprints.
const FINGERPRINT_DOMAIN: &[u8] = b"ZKAPP_TRANSCODER_RECORD_V1";

/// Raw 32-byte digest.
pub type Digest32 = [u8; 32];

/// Digest of any serializable record.
pub fn digest<T: Serialize>(record: &T) -> Result<Digest32, serde_json::Error> {
    let bytes = serde_json::to_vec(record)?;
    let mut hasher = Sha256::new();
    hasher.update(FINGERPRINT_DOMAIN);
    hasher.update(&bytes);
    Ok(hasher.finalize().into())
}

/// Lowercase hex of [`digest`].
pub fn fingerprint<T: Serialize>(record: &T) -> Result<String, serde_json::Error> {
    digest(record).map(hex::encode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        a: u64,
        b: Vec<&'static str>,
    }

    #[test]
    fn test_fingerprint_determinism() {
        let make = || Sample { a: u64::MAX, b: vec!["x", "y"] };
        assert_eq!(fingerprint(&make()).unwrap(), fingerprint(&make()).unwrap());
        assert_eq!(fingerprint(&make()).unwrap().len(), 64);
    }

    #[test]
    fn test_order_matters() {
        let one = Sample { a: 1, b: vec!["x", "y"] };
        let two = Sample { a: 1, b: vec!["y", "x"] };
        assert_ne!(digest(&one).unwrap(), digest(&two).unwrap());
    }
}
