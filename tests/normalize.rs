use ade_context::data::normalize::{meets_min_length, normalize_text};

#[test]
fn collapses_whitespace_and_lowercases() {
    let text = "  Severe\tHEADACHE\n\n and   Nausea ";
    assert_eq!(normalize_text(text), "severe headache and nausea");
}

#[test]
fn min_length_counts_characters_not_bytes() {
    assert!(meets_min_length("ödème", 5));
    assert!(!meets_min_length("rash", 5));
}
