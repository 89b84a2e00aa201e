//! MedDRA vocabulary loading from delimited concept files.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use tracing::{info, warn};

use crate::{
    data::normalize::{meets_min_length, normalize_text},
    nlp::matcher::Term,
};

/// Column layout and filtering for a vocabulary file.
#[derive(Debug, Clone)]
pub struct VocabOptions {
    pub delimiter: u8,
    /// Header of the column holding the term string.
    pub term_column: String,
    /// Header of the column holding the numeric concept code.
    pub id_column: String,
    /// Terms with fewer characters are dropped after normalisation.
    pub min_length: usize,
    /// Columns holding the preferred-term code and name, when the file maps LLTs to PTs.
    pub pt_id_column: Option<String>,
    pub pt_term_column: Option<String>,
}

impl Default for VocabOptions {
    fn default() -> Self {
        Self {
            delimiter: b'|',
            term_column: "term".to_string(),
            id_column: "term_id".to_string(),
            min_length: 5,
            pt_id_column: None,
            pt_term_column: None,
        }
    }
}

/// Load terms from a header-bearing delimited file.
pub fn load_terms(path: &Path, options: &VocabOptions) -> Result<Vec<Term>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open vocabulary {}", path.display()))?;
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        warn!(path = %path.display(), "vocabulary file is empty");
        return Ok(Vec::new());
    }
    let term_idx = column_index(&headers, &options.term_column, path)?;
    let id_idx = column_index(&headers, &options.id_column, path)?;
    let pt_idx = match (&options.pt_id_column, &options.pt_term_column) {
        (Some(id_col), Some(term_col)) => Some((
            column_index(&headers, id_col, path)?,
            column_index(&headers, term_col, path)?,
        )),
        (None, None) => None,
        _ => bail!("preferred-term id and name columns must be given together"),
    };

    let mut terms = Vec::new();
    let mut filtered = 0usize;
    for (idx, row) in reader.records().enumerate() {
        let line = idx + 2;
        let row = row.with_context(|| format!("read {} line {line}", path.display()))?;
        let text = normalize_text(row.get(term_idx).unwrap_or_default());
        if !meets_min_length(&text, options.min_length) {
            filtered += 1;
            continue;
        }
        let raw_id = row.get(id_idx).unwrap_or_default().trim();
        let id: i64 = raw_id
            .parse()
            .with_context(|| format!("{} line {line}: invalid term id '{raw_id}'", path.display()))?;
        let mut term = Term::new(text, id);
        if let Some((pt_id_idx, pt_term_idx)) = pt_idx {
            let raw_pt = row.get(pt_id_idx).unwrap_or_default().trim();
            let pt_id: i64 = raw_pt.parse().with_context(|| {
                format!("{} line {line}: invalid preferred term id '{raw_pt}'", path.display())
            })?;
            let pt_name = row.get(pt_term_idx).unwrap_or_default().trim();
            term = term.with_preferred(pt_id, pt_name);
        }
        terms.push(term);
    }

    info!(
        path = %path.display(),
        terms = terms.len(),
        filtered,
        min_length = options.min_length,
        "loaded vocabulary"
    );
    Ok(terms)
}

pub(crate) fn column_index(headers: &StringRecord, column: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(column))
        .ok_or_else(|| anyhow!("column '{column}' not found in {}", path.display()))
}
