//! Reference parsing and positional comparison.

use std::fmt;

use num_bigint::BigUint;
use tracing::info;

use crate::input::{kind_name, Tree};

use super::{Primitive, WitnessError};

/// A position where decoded and reference primitives differ.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// Position in both sequences.
    pub index: usize,
    /// Decoded primitive.
    pub decoded: Primitive,
    /// Reference primitive.
    pub reference: Primitive,
}

/// Outcome of comparing a decoded witness against a reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonReport {
    /// Decoded sequence length.
    pub decoded_len: usize,
    /// Reference sequence length.
    pub reference_len: usize,
    /// Differences over the common prefix, by index.
    pub mismatches: Vec<Mismatch>,
}

impl ComparisonReport {
    /// True when the sequences differ in length.
    pub fn length_mismatch(&self) -> bool {
        self.decoded_len != self.reference_len
    }

    /// Number of positions actually compared.
    pub fn compared(&self) -> usize {
        self.decoded_len.min(self.reference_len)
    }

    /// Equal lengths and no differing position.
    pub fn is_match(&self) -> bool {
        !self.length_mismatch() && self.mismatches.is_empty()
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.length_mismatch() {
            writeln!(f, "Length mismatch: {} vs {}", self.decoded_len, self.reference_len)?;
        }
        if self.mismatches.is_empty() {
            write!(f, "No mismatches over {} compared entries", self.compared())
        } else {
            writeln!(f, "{} mismatches:", self.mismatches.len())?;
            for m in &self.mismatches {
                writeln!(f, "Index {}:", m.index)?;
                writeln!(f, "  decoded   = {}", m.decoded)?;
                writeln!(f, "  reference = {}", m.reference)?;
            }
            Ok(())
        }
    }
}

/// Compare position by position over the common prefix.
pub fn compare(decoded: &[Primitive], reference: &[Primitive]) -> ComparisonReport {
    let mismatches: Vec<Mismatch> = decoded
        .iter()
        .zip(reference)
        .enumerate()
        .filter(|(_, (d, r))| d != r)
        .map(|(index, (d, r))| Mismatch {
            index,
            decoded: d.clone(),
            reference: r.clone(),
        })
        .collect();

    let report = ComparisonReport {
        decoded_len: decoded.len(),
        reference_len: reference.len(),
        mismatches,
    };
    info!(
        decoded = report.decoded_len,
        reference = report.reference_len,
        mismatches = report.mismatches.len(),
        "compared witness"
    );
    report
}

/// Read a reference sequence: a list of `[value, width]` pairs.
///
/// Each component may be an integer or a digit string, optionally carrying a
/// trailing `n` big-integer suffix.
pub fn parse_reference(value: &Tree) -> Result<Vec<Primitive>, WitnessError> {
    let entries = value.as_array().ok_or_else(|| WitnessError::Reference {
        index: 0,
        reason: format!("expected a list of pairs, found {}", kind_name(value)),
    })?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let reject = |reason: String| WitnessError::Reference { index, reason };
            let pair = match entry.as_array().map(Vec::as_slice) {
                Some([value, width]) => (value, width),
                Some(other) => {
                    return Err(reject(format!("expected 2 components, found {}", other.len())))
                }
                None => {
                    return Err(reject(format!("expected a pair, found {}", kind_name(entry))))
                }
            };
            let value = unsigned(pair.0).map_err(reject)?;
            let width: u32 = unsigned(pair.1)
                .map_err(reject)?
                .try_into()
                .map_err(|_| reject("width does not fit in 32 bits".to_string()))?;
            Ok(Primitive { value, width })
        })
        .collect()
}

fn unsigned(value: &Tree) -> Result<BigUint, String> {
    let text = match value {
        Tree::Number(n) => n.to_string(),
        Tree::String(s) => s.trim_end_matches('n').to_string(),
        other => return Err(format!("expected an integer, found {}", kind_name(other))),
    };
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("'{text}' is not an unsigned integer"));
    }
    BigUint::parse_bytes(text.as_bytes(), 10)
        .ok_or_else(|| format!("'{text}' is not an unsigned integer"))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::witness::decode_witness;
    use serde_json::json;

    #[test]
    fn test_scenario_match() {
        let decoded = decode_witness("BOOL{val:true}BOOL{val:false}U32{val:3}").unwrap();
        let reference = parse_reference(&json!([[1, 1], [0, 1], [3, 32]])).unwrap();
        let report = compare(&decoded, &reference);
        assert!(report.mismatches.is_empty());
        assert!(report.is_match());
    }

    #[test]
    fn test_scenario_single_mismatch() {
        let decoded = decode_witness("BOOL{val:true}BOOL{val:false}U32{val:3}").unwrap();
        let reference = parse_reference(&json!([[1, 1], [0, 1], [4, 32]])).unwrap();
        let report = compare(&decoded, &reference);
        assert_eq!(
            report.mismatches,
            vec![Mismatch {
                index: 2,
                decoded: Primitive::new(3u8, 32),
                reference: Primitive::new(4u8, 32),
            }]
        );
        assert!(!report.is_match());
    }

    #[test]
    fn test_width_difference_is_mismatch() {
        let report = compare(&[Primitive::new(3u8, 32)], &[Primitive::new(3u8, 64)]);
        assert_eq!(report.mismatches.len(), 1);
    }

    #[test]
    fn test_length_mismatch_compares_prefix() {
        let decoded: Vec<Primitive> = (0u8..5).map(|v| Primitive::new(v, 32)).collect();
        let reference: Vec<Primitive> = (0u8..3).map(|v| Primitive::new(v, 32)).collect();
        let report = compare(&decoded, &reference);
        assert!(report.length_mismatch());
        assert_eq!(report.compared(), 3);
        assert!(report.mismatches.is_empty());
        assert!(!report.is_match());
        assert!(report.to_string().starts_with("Length mismatch: 5 vs 3"));
    }

    #[test]
    fn test_reference_suffix_stripped() {
        let reference = parse_reference(&json!([["18446744073709551615n", 64], ["3", "32n"]])).unwrap();
        assert_eq!(reference[0], Primitive::new(u64::MAX, 64));
        assert_eq!(reference[1], Primitive::new(3u8, 32));
    }

    #[test]
    fn test_reference_errors() {
        assert!(matches!(
            parse_reference(&json!({ "a": 1 })),
            Err(WitnessError::Reference { index: 0, .. })
        ));
        assert!(matches!(
            parse_reference(&json!([[1, 1], [1]])),
            Err(WitnessError::Reference { index: 1, .. })
        ));
        assert!(matches!(
            parse_reference(&json!([[-1, 1]])),
            Err(WitnessError::Reference { index: 0, .. })
        ));
        assert!(matches!(
            parse_reference(&json!([[1, 4294967296u64]])),
            Err(WitnessError::Reference { index: 0, .. })
        ));
    }

    #[test]
    fn test_reference_from_lenient_text() {
        let tree = crate::input::parse_lenient("[\n  [1, 1,],\n  [3n, 32,],\n]").unwrap();
        let reference = parse_reference(&tree).unwrap();
        assert_eq!(reference, vec![Primitive::new(1u8, 1), Primitive::new(3u8, 32)]);
    }
}
