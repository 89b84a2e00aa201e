//! Manual annotation files used as the training reference standard.

use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::info;

use crate::{
    data::{normalize::normalize_text, vocab::column_index},
    nlp::{assemble::DocumentId, label::ReferenceSet},
};

/// Column layout of a reference annotation file.
#[derive(Debug, Clone)]
pub struct ReferenceOptions {
    pub delimiter: u8,
    pub text_id_column: String,
    /// Annotated matching string; normalised like document text.
    pub term_column: String,
    /// Optional code column, used when the file has it.
    pub term_id_column: String,
}

impl Default for ReferenceOptions {
    fn default() -> Self {
        Self {
            delimiter: b'|',
            text_id_column: "text_id".to_string(),
            term_column: "term".to_string(),
            term_id_column: "term_id".to_string(),
        }
    }
}

/// Load annotations into a [`ReferenceSet`].
pub fn load_reference(path: &Path, options: &ReferenceOptions) -> Result<ReferenceSet> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open reference {}", path.display()))?;
    let headers = reader.headers()?.clone();
    let text_idx = column_index(&headers, &options.text_id_column, path)?;
    let term_idx = column_index(&headers, &options.term_column, path)?;
    let id_idx = column_index(&headers, &options.term_id_column, path).ok();

    let mut reference = ReferenceSet::new();
    let mut annotations = 0usize;
    for (idx, row) in reader.records().enumerate() {
        let line = idx + 2;
        let row = row.with_context(|| format!("read {} line {line}", path.display()))?;
        let raw_text_id = row.get(text_idx).unwrap_or_default().trim();
        let term = normalize_text(row.get(term_idx).unwrap_or_default());
        if raw_text_id.is_empty() || term.is_empty() {
            continue;
        }
        let term_id = match id_idx.map(|i| row.get(i).unwrap_or_default().trim()) {
            Some(raw) if !raw.is_empty() => Some(raw.parse::<i64>().with_context(|| {
                format!("{} line {line}: invalid term id '{raw}'", path.display())
            })?),
            _ => None,
        };
        reference.annotate(DocumentId::from_field(raw_text_id), term, term_id);
        annotations += 1;
    }

    info!(
        path = %path.display(),
        documents = reference.len(),
        annotations,
        "loaded reference annotations"
    );
    Ok(reference)
}
