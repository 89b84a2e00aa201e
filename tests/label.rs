use std::sync::Arc;

use ade_context::nlp::{
    assemble::{ContextAssembler, Document, DocumentId},
    label::{label_records, EventLabel, ReferenceSet},
    matcher::{Term, TermMatcher},
    window::ContextSettings,
};

fn assembler() -> ContextAssembler {
    let matcher = TermMatcher::build(vec![
        Term::new("rash", 10037844),
        Term::new("headache", 10019211),
        Term::new("nausea", 10028813),
    ])
    .unwrap();
    ContextAssembler::new(Arc::new(matcher), ContextSettings::new(6, 0.5).unwrap()).unwrap()
}

fn reference() -> ReferenceSet {
    let mut reference = ReferenceSet::new();
    reference.annotate(DocumentId::from("set-a"), "rash", None);
    reference.annotate(DocumentId::from("set-b"), "headache tablets", Some(10019211));
    reference
}

#[test]
fn labels_matches_against_annotations() {
    let documents = vec![
        Document::new("set-a", "rash and headache"),
        Document::new("set-b", "headache and rash"),
    ];
    let mut report = assembler().assemble(&documents);
    label_records(&mut report.records, &reference());

    let labels: Vec<(String, &str, EventLabel)> = report
        .records
        .iter()
        .map(|r| (r.text_id.to_string(), r.term.as_str(), r.label.unwrap()))
        .collect();
    assert_eq!(
        labels,
        [
            ("set-a".to_string(), "rash", EventLabel::IsEvent),
            ("set-a".to_string(), "headache", EventLabel::NotEvent),
            ("set-b".to_string(), "headache", EventLabel::IsEvent),
            ("set-b".to_string(), "rash", EventLabel::NotEvent),
        ]
    );
}

#[test]
fn unannotated_documents_are_left_out() {
    let documents = vec![
        Document::new("set-a", "rash"),
        Document::new("set-z", "nausea"),
        Document::malformed("set-b"),
    ];
    let kept = reference().retain_annotated(documents);
    let ids: Vec<String> = kept.iter().map(|d| d.id.to_string()).collect();
    assert_eq!(ids, ["set-a", "set-b"]);
}

#[test]
fn labels_serialise_in_snake_case() {
    assert_eq!(
        serde_json::to_string(&EventLabel::IsEvent).unwrap(),
        "\"is_event\""
    );
    assert_eq!(EventLabel::NotEvent.as_str(), "not_event");
}
