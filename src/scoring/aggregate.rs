//! Grouping of per-mention predictions.

use indexmap::IndexMap;

use crate::{
    nlp::{
        assemble::{ContextRecord, DocumentId},
        classifier::Prediction,
    },
    scoring::TermScore,
};

#[derive(Default)]
struct Accumulator {
    term: String,
    mentions: usize,
    p_not_event: f64,
    p_is_event: f64,
}

/// Average predictions over every mention of a term within one document.
///
/// Groups keep the order in which they first appear in `records`.
pub fn mean_by_term(records: &[ContextRecord], predictions: &[Prediction]) -> Vec<TermScore> {
    let mut groups: IndexMap<(DocumentId, i64), Accumulator> = IndexMap::new();
    for (record, prediction) in records.iter().zip(predictions) {
        let acc = groups
            .entry((record.text_id.clone(), record.term_id))
            .or_insert_with(|| Accumulator {
                term: record.term.clone(),
                ..Accumulator::default()
            });
        acc.mentions += 1;
        acc.p_not_event += prediction.p_not_event;
        acc.p_is_event += prediction.p_is_event;
    }

    groups
        .into_iter()
        .map(|((text_id, term_id), acc)| {
            let n = acc.mentions as f64;
            TermScore {
                text_id,
                term_id,
                term: acc.term,
                mentions: acc.mentions,
                p_not_event: acc.p_not_event / n,
                p_is_event: acc.p_is_event / n,
            }
        })
        .collect()
}
