//! Turn classifier outputs into per-label adverse-event calls.

pub mod aggregate;

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    data,
    nlp::{
        assemble::{ContextRecord, DocumentId},
        classifier::{EventClassifier, PrecomputedScores},
        error::ContextError,
    },
};

/// Mean class probabilities for one `(text_id, term_id)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermScore {
    pub text_id: DocumentId,
    pub term_id: i64,
    pub term: String,
    pub mentions: usize,
    pub p_not_event: f64,
    pub p_is_event: f64,
}

/// Score `records` and keep pairs whose mean `p_is_event` exceeds `threshold`.
pub fn score(
    records: &[ContextRecord],
    classifier: &dyn EventClassifier,
    threshold: f64,
) -> Result<Vec<TermScore>> {
    let contexts: Vec<String> = records.iter().map(|r| r.context.clone()).collect();
    let predictions = classifier.predict(&contexts)?;
    if predictions.len() != records.len() {
        return Err(ContextError::PredictionCount {
            expected: records.len(),
            actual: predictions.len(),
        }
        .into());
    }

    let grouped = aggregate::mean_by_term(records, &predictions);
    let total = grouped.len();
    let kept: Vec<TermScore> = grouped
        .into_iter()
        .filter(|s| s.p_is_event > threshold)
        .collect();
    info!(pairs = total, kept = kept.len(), threshold, "scored term mentions");
    Ok(kept)
}

/// Join a context file with its precomputed predictions and persist the calls.
pub fn score_predictions(
    contexts: &Path,
    predictions: &Path,
    threshold: f64,
    out: &Path,
) -> Result<usize> {
    let records = data::store::read_records(contexts)?;
    if records.is_empty() {
        warn!("no context records to score");
    }
    let classifier = PrecomputedScores::from_path(predictions)?;
    let scores = score(&records, &classifier, threshold)?;
    data::store::write_scores(&scores, out)?;
    Ok(scores.len())
}
