use officedb_core::{IdError, ObjectId};
use std::collections::HashSet;

#[test]
fn parse_accepts_mixed_case_and_encodes_lowercase() {
    let id = ObjectId::parse_str("507F1F77bcf86cd799439011").unwrap();
    assert_eq!(id.to_hex(), "507f1f77bcf86cd799439011");
    assert_eq!(id.to_string(), id.to_hex());
}

#[test]
fn encode_then_parse_preserves_bytes() {
    let id = ObjectId::new();
    let hex = id.to_hex();
    assert_eq!(hex.len(), 24);
    assert_eq!(ObjectId::parse_str(&hex).unwrap(), id);
    assert_eq!(hex.parse::<ObjectId>().unwrap(), id);
}

#[test]
fn parse_rejects_malformed_ids() {
    let inputs = [
        "",
        "abc",
        "507f1f77bcf86cd79943901",
        "507f1f77bcf86cd7994390111",
        "507f1f77bcf86cd79943901g",
        " 507f1f77bcf86cd799439011",
        "507f1f77-bcf8-6cd7-9943-9011",
        "ééééééééééééé",
    ];
    for input in inputs {
        let err: IdError = ObjectId::parse_str(input).unwrap_err();
        assert!(err.to_string().contains("24 hexadecimal"), "{input:?}");
    }
}

#[test]
fn rejected_input_is_capped_in_error() {
    let long_input = "z".repeat(500);
    let err = ObjectId::parse_str(&long_input).unwrap_err();
    assert_eq!(err.input().chars().count(), 64);
}

#[test]
fn generated_ids_are_unique_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| (0..500).map(|_| ObjectId::new()).collect::<Vec<_>>()))
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(seen.insert(id), "duplicate id {id}");
        }
    }
    assert_eq!(seen.len(), 2_000);
}
