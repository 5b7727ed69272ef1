//! Witness dumps against reference sequences.

use zkapp_transcoder::witness::Mismatch;
use zkapp_transcoder::{compare, decode_witness, parse_lenient, parse_reference, Primitive};

const WITNESS: &str = include_str!("fixtures/witness.txt");
const REFERENCE: &str = include_str!("fixtures/witness_reference.js");

fn reference() -> Vec<Primitive> {
    parse_reference(&parse_lenient(REFERENCE).unwrap()).unwrap()
}

#[test]
fn test_fixture_matches_reference() {
    let decoded = decode_witness(WITNESS).unwrap();
    let report = compare(&decoded, &reference());
    assert!(report.is_match(), "{report}");
    assert_eq!(report.compared(), 5);
}

#[test]
fn test_altered_entry_reported() {
    let decoded = decode_witness(&WITNESS.replace("U32{val:3}", "U32{val:4}")).unwrap();
    let report = compare(&decoded, &reference());
    assert_eq!(
        report.mismatches,
        vec![Mismatch {
            index: 2,
            decoded: Primitive::new(4u8, 32),
            reference: Primitive::new(3u8, 32),
        }]
    );
    assert!(report.to_string().contains("Index 2:"));
}

#[test]
fn test_truncated_witness_is_length_mismatch() {
    let decoded = decode_witness("BOOL{val:true}BOOL{val:false}").unwrap();
    let report = compare(&decoded, &reference());
    assert!(report.length_mismatch());
    assert!(report.mismatches.is_empty());
    assert!(!report.is_match());
}
