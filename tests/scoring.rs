use std::io::Write;

use ade_context::{
    cli::OutputFormat,
    data::store::write_records,
    nlp::{
        assemble::{ContextRecord, DocumentId},
        classifier::{EventClassifier, PrecomputedScores, Prediction},
        error::ContextError,
    },
    scoring,
};

fn record(match_id: u64, text_id: &str, term_id: i64, term: &str) -> ContextRecord {
    ContextRecord {
        match_id,
        text_id: DocumentId::from(text_id),
        term_id,
        term: term.to_string(),
        pt_id: None,
        pt_term: None,
        label: None,
        context: format!("{term} before EVENT after"),
    }
}

/// Scores every context by whether it mentions "rash".
struct KeywordClassifier;

impl EventClassifier for KeywordClassifier {
    fn predict(&self, contexts: &[String]) -> anyhow::Result<Vec<Prediction>> {
        Ok(contexts
            .iter()
            .map(|c| {
                if c.starts_with("rash") {
                    Prediction::new(0.1, 0.9)
                } else {
                    Prediction::new(0.8, 0.2)
                }
            })
            .collect())
    }
}

#[test]
fn averages_mentions_per_label_and_term() {
    let records = vec![
        record(0, "L1", 10, "nausea"),
        record(1, "L1", 10, "nausea"),
        record(2, "L2", 10, "nausea"),
    ];
    let classifier = PrecomputedScores::new(vec![
        Prediction::new(0.2, 0.8),
        Prediction::new(0.6, 0.4),
        Prediction::new(0.9, 0.1),
    ]);
    let scores = scoring::score(&records, &classifier, 0.0).unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0].text_id, DocumentId::from("L1"));
    assert_eq!(scores[0].mentions, 2);
    assert!((scores[0].p_is_event - 0.6).abs() < 1e-12);
    assert!((scores[0].p_not_event - 0.4).abs() < 1e-12);
    assert_eq!(scores[1].text_id, DocumentId::from("L2"));
}

#[test]
fn threshold_is_strict() {
    let records = vec![record(0, "L1", 1, "rash"), record(1, "L1", 2, "fatigue")];
    let classifier = PrecomputedScores::new(vec![
        Prediction::new(0.5, 0.5),
        Prediction::new(0.4, 0.6),
    ]);
    let scores = scoring::score(&records, &classifier, 0.5).unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].term, "fatigue");
}

#[test]
fn accepts_any_classifier_implementation() {
    let records = vec![record(0, "L1", 1, "rash"), record(1, "L1", 2, "fatigue")];
    let scores = scoring::score(&records, &KeywordClassifier, 0.5).unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].term_id, 1);
}

#[test]
fn prediction_count_mismatch_is_an_error() {
    let records = vec![record(0, "L1", 1, "rash")];
    let classifier = PrecomputedScores::new(Vec::new());
    let err = scoring::score(&records, &classifier, 0.5).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ContextError>(),
        Some(ContextError::PredictionCount {
            expected: 1,
            actual: 0
        })
    ));
}

#[test]
fn reads_headerless_results_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "0.25,0.75").unwrap();
    writeln!(file, "0.9,0.1").unwrap();
    let scores = PrecomputedScores::from_path(file.path()).unwrap();
    assert_eq!(scores.len(), 2);
    let predictions = scores
        .predict(&["a".to_string(), "b".to_string()])
        .unwrap();
    assert_eq!(predictions[0], Prediction::new(0.25, 0.75));
}

#[test]
fn scores_prediction_files_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let contexts = dir.path().join("contexts.csv");
    let predictions = dir.path().join("results.csv");
    let out = dir.path().join("scores.csv");
    let records = vec![
        record(0, "000123", 1, "rash"),
        record(1, "000123", 1, "rash"),
        record(2, "000123", 2, "fatigue"),
    ];
    write_records(&records, &contexts, OutputFormat::Csv).unwrap();
    std::fs::write(&predictions, "0.2,0.8\n0.4,0.6\n0.9,0.1\n").unwrap();

    let kept = scoring::score_predictions(&contexts, &predictions, 0.5, &out).unwrap();
    assert_eq!(kept, 1);
    let written = std::fs::read_to_string(&out).unwrap();
    let mut lines = written.lines();
    assert_eq!(
        lines.next(),
        Some("text_id,term_id,term,mentions,p_not_event,p_is_event")
    );
    let row: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert_eq!(&row[..4], ["000123", "1", "rash", "2"]);
    assert!((row[5].parse::<f64>().unwrap() - 0.7).abs() < 1e-9);
    assert_eq!(lines.next(), None);
}
