//! Drive matcher and window builder across a document collection.

use std::{fmt, sync::Arc};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::nlp::{
    error::ContextError,
    label::EventLabel,
    matcher::{PreferredTerm, TermMatch, TermMatcher},
    window::{self, ContextSettings},
};

/// Identifier of a source document; label ids are numeric or opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    Int(i64),
    Text(String),
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl DocumentId {
    /// Rebuild an id from a bare text field. Only canonical integers become
    /// `Int`, so `"000123"` and `"+5"` stay text.
    pub fn from_field(field: &str) -> Self {
        match field.parse::<i64>() {
            Ok(id) if id.to_string() == field => Self::Int(id),
            _ => Self::Text(field.to_string()),
        }
    }
}

impl From<i64> for DocumentId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Normalized label text. `text` is `None` when upstream parsing failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    #[serde(default)]
    pub text: Option<String>,
}

impl Document {
    pub fn new(id: impl Into<DocumentId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: Some(text.into()),
        }
    }

    pub fn malformed(id: impl Into<DocumentId>) -> Self {
        Self {
            id: id.into(),
            text: None,
        }
    }
}

/// One classifier input with full provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextRecord {
    pub match_id: u64,
    pub text_id: DocumentId,
    pub term_id: i64,
    pub term: String,
    #[serde(default)]
    pub pt_id: Option<i64>,
    #[serde(default)]
    pub pt_term: Option<String>,
    /// Reference class, set only when building training examples.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<EventLabel>,
    pub context: String,
}

/// Document that could not be processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub text_id: DocumentId,
    pub reason: String,
}

/// Match whose window was rejected in strict mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedMatch {
    pub text_id: DocumentId,
    pub term_id: i64,
    pub start: usize,
    pub reason: String,
}

/// Output of one assembly run, successes and partial failures side by side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblyReport {
    pub records: Vec<ContextRecord>,
    pub skipped: Vec<SkippedDocument>,
    pub dropped: Vec<DroppedMatch>,
    pub documents_processed: usize,
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub documents_processed: usize,
    pub documents_skipped: usize,
    pub matches_found: usize,
    pub matches_dropped: usize,
    pub records: usize,
}

impl RunSummary {
    pub fn log(&self) {
        info!(
            documents = self.documents_processed,
            skipped = self.documents_skipped,
            matches = self.matches_found,
            dropped = self.matches_dropped,
            records = self.records,
            "context assembly finished"
        );
    }
}

impl AssemblyReport {
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            documents_processed: self.documents_processed,
            documents_skipped: self.skipped.len(),
            matches_found: self.records.len() + self.dropped.len(),
            matches_dropped: self.dropped.len(),
            records: self.records.len(),
        }
    }
}

struct Window {
    term_id: i64,
    term: String,
    preferred: Option<PreferredTerm>,
    context: String,
}

enum DocumentOutcome {
    Skipped(SkippedDocument),
    Scanned {
        text_id: DocumentId,
        windows: Vec<Result<Window, DroppedMatch>>,
    },
}

/// Pairs a shared matcher with window settings.
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    matcher: Arc<TermMatcher>,
    settings: ContextSettings,
}

impl ContextAssembler {
    pub fn new(matcher: Arc<TermMatcher>, settings: ContextSettings) -> Result<Self, ContextError> {
        settings.validate()?;
        Ok(Self { matcher, settings })
    }

    pub fn matcher(&self) -> &TermMatcher {
        &self.matcher
    }

    pub fn settings(&self) -> &ContextSettings {
        &self.settings
    }

    /// Process documents in order, numbering matches across the whole run.
    pub fn assemble(&self, documents: &[Document]) -> AssemblyReport {
        let outcomes = documents.iter().map(|doc| self.process(doc)).collect();
        collect_outcomes(outcomes)
    }

    /// Parallel variant of [`Self::assemble`]; output is identical.
    pub fn assemble_parallel(&self, documents: &[Document]) -> AssemblyReport {
        let outcomes = documents.par_iter().map(|doc| self.process(doc)).collect();
        collect_outcomes(outcomes)
    }

    fn process(&self, document: &Document) -> DocumentOutcome {
        let Some(text) = document.text.as_deref() else {
            let err = ContextError::MalformedDocument {
                text_id: document.id.clone(),
            };
            warn!(text_id = %document.id, "skipping document: {err}");
            return DocumentOutcome::Skipped(SkippedDocument {
                text_id: document.id.clone(),
                reason: err.to_string(),
            });
        };

        let windows = self
            .matcher
            .scan(text)
            .into_iter()
            .map(|found| self.build_window(&document.id, text, found))
            .collect();
        DocumentOutcome::Scanned {
            text_id: document.id.clone(),
            windows,
        }
    }

    fn build_window(
        &self,
        text_id: &DocumentId,
        text: &str,
        found: TermMatch,
    ) -> Result<Window, DroppedMatch> {
        match window::build_context(text, &found, &self.settings) {
            Ok(context) => Ok(Window {
                term_id: found.term_id,
                term: found.term,
                preferred: found.preferred,
                context,
            }),
            Err(err) => {
                debug!(%text_id, term_id = found.term_id, start = found.start, "dropping match: {err}");
                Err(DroppedMatch {
                    text_id: text_id.clone(),
                    term_id: found.term_id,
                    start: found.start,
                    reason: err.to_string(),
                })
            }
        }
    }
}

fn collect_outcomes(outcomes: Vec<DocumentOutcome>) -> AssemblyReport {
    let mut report = AssemblyReport::default();
    let mut match_id = 0u64;
    for outcome in outcomes {
        match outcome {
            DocumentOutcome::Skipped(skipped) => report.skipped.push(skipped),
            DocumentOutcome::Scanned { text_id, windows } => {
                report.documents_processed += 1;
                for window in windows {
                    match window {
                        Ok(window) => {
                            let (pt_id, pt_term) = match window.preferred {
                                Some(pt) => (Some(pt.id), Some(pt.name)),
                                None => (None, None),
                            };
                            report.records.push(ContextRecord {
                                match_id,
                                text_id: text_id.clone(),
                                term_id: window.term_id,
                                term: window.term,
                                pt_id,
                                pt_term,
                                label: None,
                                context: window.context,
                            });
                            match_id += 1;
                        }
                        Err(dropped) => report.dropped.push(dropped),
                    }
                }
            }
        }
    }
    report
}
