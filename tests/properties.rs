use ade_context::nlp::{
    matcher::{Term, TermMatcher},
    window::{build_context, ContextSettings},
};
use proptest::prelude::*;

fn vocabulary() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[abc]{1,3}", 1..6)
}

/// Every overlapping occurrence, found the slow way.
fn naive_matches(text: &str, terms: &[String]) -> Vec<(usize, usize, i64)> {
    let mut out = Vec::new();
    for (id, term) in terms.iter().enumerate() {
        for start in 0..text.len() {
            if text[start..].starts_with(term.as_str()) {
                out.push((start, start + term.len() - 1, id as i64));
            }
        }
    }
    out.sort_unstable();
    out
}

fn build(terms: &[String]) -> TermMatcher {
    TermMatcher::build(
        terms
            .iter()
            .enumerate()
            .map(|(id, t)| Term::new(t.clone(), id as i64))
            .collect(),
    )
    .unwrap()
}

proptest! {
    /// Property: each occurrence of each term is reported exactly once.
    #[test]
    fn prop_scan_is_complete(text in "[abc ]{0,40}", terms in vocabulary()) {
        let matcher = build(&terms);
        let mut found: Vec<(usize, usize, i64)> = matcher
            .scan(&text)
            .into_iter()
            .map(|m| (m.start, m.end, m.term_id))
            .collect();
        found.sort_unstable();
        prop_assert_eq!(found, naive_matches(&text, &terms));
    }

    /// Property: offsets slice back to the matched term.
    #[test]
    fn prop_offsets_slice_term(text in "[abc ]{0,40}", terms in vocabulary()) {
        let matcher = build(&terms);
        for m in matcher.scan(&text) {
            prop_assert_eq!(&text[m.start..=m.end], m.term.as_str());
        }
    }

    /// Property: matches come out in ascending end offset.
    #[test]
    fn prop_scan_orders_by_end(text in "[abc ]{0,40}", terms in vocabulary()) {
        let matcher = build(&terms);
        let ends: Vec<usize> = matcher.scan(&text).iter().map(|m| m.end).collect();
        prop_assert!(ends.windows(2).all(|w| w[0] <= w[1]));
    }

    /// Property: windows are deterministic and always carry the placeholder.
    #[test]
    fn prop_window_is_deterministic(
        text in "[abc ]{0,40}",
        terms in vocabulary(),
        nwords in 0usize..40,
        prop_before in 0.0f64..=1.0,
    ) {
        let matcher = build(&terms);
        let settings = ContextSettings::new(nwords, prop_before).unwrap();
        for m in matcher.scan(&text) {
            let first = build_context(&text, &m, &settings).unwrap();
            let second = build_context(&text, &m, &settings).unwrap();
            prop_assert!(first.starts_with(m.term.as_str()));
            prop_assert!(first.split(' ').any(|w| w == "EVENT"));
            prop_assert_eq!(first, second);
        }
    }

    /// Property: a preceding word survives even when prop_before is zero.
    #[test]
    fn prop_zero_prop_before_keeps_one_word(
        prefix in "[a-z]{1,6}( [a-z]{1,6}){0,4}",
        nwords in 0usize..40,
    ) {
        let text = format!("{prefix} rash tail");
        let matcher = TermMatcher::build(vec![Term::new("rash", 1)]).unwrap();
        let settings = ContextSettings::new(nwords, 0.0).unwrap();
        let m = matcher
            .scan(&text)
            .into_iter()
            .find(|m| m.start == prefix.len() + 1)
            .unwrap();
        let context = build_context(&text, &m, &settings).unwrap();
        let last_prefix_word = prefix.split(' ').last().unwrap();
        let expected = format!("rash {last_prefix_word} EVENT");
        prop_assert!(context.starts_with(expected.as_str()));
    }
}
