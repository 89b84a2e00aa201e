//! Reference-standard labelling of context records for classifier training.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::nlp::assemble::{ContextRecord, Document, DocumentId};

/// Training class of one context record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventLabel {
    IsEvent,
    NotEvent,
}

impl EventLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IsEvent => "is_event",
            Self::NotEvent => "not_event",
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Annotations {
    terms: HashSet<String>,
    term_ids: HashSet<i64>,
}

/// Manually annotated adverse events per document.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    documents: HashMap<DocumentId, Annotations>,
}

impl ReferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `term` (and optionally its code) is a true event in `text_id`.
    pub fn annotate(&mut self, text_id: DocumentId, term: impl Into<String>, term_id: Option<i64>) {
        let entry = self.documents.entry(text_id).or_default();
        entry.terms.insert(term.into());
        entry.term_ids.extend(term_id);
    }

    pub fn contains_document(&self, text_id: &DocumentId) -> bool {
        self.documents.contains_key(text_id)
    }

    /// Number of annotated documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// A match is an event when its term string or code is annotated for its document.
    pub fn label(&self, record: &ContextRecord) -> EventLabel {
        let annotated = self.documents.get(&record.text_id).is_some_and(|a| {
            a.terms.contains(&record.term) || a.term_ids.contains(&record.term_id)
        });
        if annotated {
            EventLabel::IsEvent
        } else {
            EventLabel::NotEvent
        }
    }

    /// Documents without annotations carry no ground truth and are left out.
    pub fn retain_annotated(&self, documents: Vec<Document>) -> Vec<Document> {
        let total = documents.len();
        let kept: Vec<Document> = documents
            .into_iter()
            .filter(|doc| self.contains_document(&doc.id))
            .collect();
        info!(
            documents = total,
            annotated = kept.len(),
            "restricted documents to reference set"
        );
        kept
    }
}

/// Set the reference class on every record.
pub fn label_records(records: &mut [ContextRecord], reference: &ReferenceSet) {
    let mut events = 0usize;
    for record in records.iter_mut() {
        let label = reference.label(record);
        if label == EventLabel::IsEvent {
            events += 1;
        }
        record.label = Some(label);
    }
    info!(
        records = records.len(),
        events,
        not_events = records.len() - events,
        "labelled context records"
    );
}
