use ade_context::nlp::{
    error::ContextError,
    matcher::TermMatch,
    window::{build_context, window_sizes, ContextSettings},
};

fn found(term: &str, start: usize, end: usize) -> TermMatch {
    TermMatch {
        term_id: 1,
        term: term.to_string(),
        start,
        end,
        preferred: None,
    }
}

fn settings(nwords: usize, prop_before: f64) -> ContextSettings {
    ContextSettings::new(nwords, prop_before).unwrap()
}

#[test]
fn builds_expected_windows() {
    let cases = [
        ("foo bar baz", found("bar", 4, 6), 1, 0.5, "bar foo EVENT baz"),
        ("foo bar baz", found("bar", 4, 6), 1, 0.15, "bar foo EVENT baz"),
        ("foo bar baz", found("baz", 8, 10), 1, 0.5, "baz bar EVENT"),
        ("a b bar c d", found("bar", 4, 6), 6, 0.5, "bar a b EVENT c d"),
        ("a b c bar d e f", found("bar", 6, 8), 6, 0.5, "bar b c EVENT d e"),
        ("a b c bar d e f", found("bar", 6, 8), 6, 0.75, "bar a b c EVENT d"),
    ];
    for (text, m, nwords, prop_before, expected) in cases {
        let context = build_context(text, &m, &settings(nwords, prop_before)).unwrap();
        assert_eq!(context, expected, "{text} / {nwords} / {prop_before}");
    }
}

#[test]
fn match_at_document_start_has_no_before_words() {
    let context = build_context("foo bar baz", &found("foo", 0, 2), &settings(6, 0.5)).unwrap();
    assert_eq!(context, "foo EVENT bar baz");
}

#[test]
fn default_settings_use_historical_split() {
    let defaults = ContextSettings::default();
    assert_eq!(defaults.nwords, 125);
    assert_eq!(window_sizes(1, &defaults), (15, 107));
    assert_eq!(window_sizes(3, &defaults), (14, 104));
}

#[test]
fn sizes_clamp_to_one_when_term_exceeds_budget() {
    assert_eq!(window_sizes(10, &settings(4, 0.5)), (1, 1));
    assert_eq!(window_sizes(2, &settings(4, 0.5)), (1, 1));
}

#[test]
fn extreme_proportions_still_keep_one_word_each_side() {
    assert_eq!(window_sizes(1, &settings(10, 0.0)), (1, 8));
    assert_eq!(window_sizes(1, &settings(10, 1.0)), (8, 1));

    let text = "alpha beta gamma rash delta epsilon";
    let m = found("rash", 17, 20);
    let all_after = build_context(text, &m, &settings(10, 0.0)).unwrap();
    assert_eq!(all_after, "rash gamma EVENT delta epsilon");
    let all_before = build_context(text, &m, &settings(10, 1.0)).unwrap();
    assert_eq!(all_before, "rash alpha beta gamma EVENT delta");
}

#[test]
fn multi_word_terms_shrink_the_budget() {
    let text = "w1 w2 w3 w4 back pain w5 w6 w7 w8";
    let m = found("back pain", 12, 20);
    let context = build_context(text, &m, &settings(8, 0.5)).unwrap();
    assert_eq!(context, "back pain w3 w4 EVENT w5 w6");
}

#[test]
fn windowing_is_deterministic() {
    let text = "a b c bar d e f";
    let m = found("bar", 6, 8);
    let s = settings(6, 0.5);
    assert_eq!(
        build_context(text, &m, &s).unwrap(),
        build_context(text, &m, &s).unwrap()
    );
}

#[test]
fn rejects_proportions_outside_unit_interval() {
    assert!(matches!(
        ContextSettings::new(125, 1.5),
        Err(ContextError::InvalidProportion(_))
    ));
    assert!(ContextSettings::new(125, -0.1).is_err());
    assert!(ContextSettings::new(125, f64::NAN).is_err());
}

#[test]
fn offsets_outside_text_are_an_error() {
    let err = build_context("foo", &found("bar", 4, 6), &settings(6, 0.5)).unwrap_err();
    assert!(matches!(err, ContextError::OffsetOutOfRange { len: 3, .. }));
}

#[test]
fn strict_mode_rejects_over_budget_windows() {
    let strict = settings(1, 0.5).with_strict(true);
    let err = build_context("foo bar baz", &found("bar", 4, 6), &strict).unwrap_err();
    assert!(matches!(
        err,
        ContextError::WindowTooLong {
            tokens: 4,
            limit: 2,
            ..
        }
    ));

    let roomy = settings(6, 0.5).with_strict(true);
    let context = build_context("a b c bar d e f", &found("bar", 6, 8), &roomy).unwrap();
    assert_eq!(context, "bar b c EVENT d e");
}
