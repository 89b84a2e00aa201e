//! Persistence of context records, scores and run manifests.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use polars::prelude::{DataFrame, NamedFrom, ParquetWriter, Series};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    cli::OutputFormat,
    nlp::{
        assemble::{ContextRecord, DocumentId, RunSummary},
        label::EventLabel,
        window::ContextSettings,
    },
    scoring::TermScore,
};

/// Provenance written next to every context file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub generated_at: DateTime<Utc>,
    pub vocabulary: String,
    pub documents: String,
    pub section: String,
    pub terms: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub settings: ContextSettings,
    pub summary: RunSummary,
}

pub fn write_records(records: &[ContextRecord], path: &Path, format: OutputFormat) -> Result<()> {
    ensure_parent(path)?;
    match format {
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_path(path)
                .with_context(|| format!("create {}", path.display()))?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
        OutputFormat::Parquet => {
            let mut columns = vec![
                Series::new(
                    "match_id".into(),
                    records.iter().map(|r| r.match_id).collect::<Vec<_>>(),
                ),
                Series::new(
                    "text_id".into(),
                    records
                        .iter()
                        .map(|r| r.text_id.to_string())
                        .collect::<Vec<_>>(),
                ),
                Series::new(
                    "term_id".into(),
                    records.iter().map(|r| r.term_id).collect::<Vec<_>>(),
                ),
                Series::new(
                    "term".into(),
                    records.iter().map(|r| r.term.clone()).collect::<Vec<_>>(),
                ),
                Series::new(
                    "pt_id".into(),
                    records.iter().map(|r| r.pt_id).collect::<Vec<_>>(),
                ),
                Series::new(
                    "pt_term".into(),
                    records
                        .iter()
                        .map(|r| r.pt_term.as_deref())
                        .collect::<Vec<_>>(),
                ),
            ];
            if records.iter().any(|r| r.label.is_some()) {
                columns.push(Series::new(
                    "label".into(),
                    records
                        .iter()
                        .map(|r| r.label.map(EventLabel::as_str))
                        .collect::<Vec<_>>(),
                ));
            }
            columns.push(Series::new(
                "context".into(),
                records.iter().map(|r| r.context.clone()).collect::<Vec<_>>(),
            ));
            let mut df = DataFrame::new(columns)?;
            let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
            ParquetWriter::new(file).finish(&mut df)?;
        }
    }
    info!(path = %path.display(), rows = records.len(), ?format, "wrote context records");
    Ok(())
}

/// CSV row as written; `text_id` is kept verbatim so csv's type guessing
/// cannot turn `"000123"` into a number.
#[derive(Debug, Deserialize)]
struct RecordRow {
    match_id: u64,
    text_id: String,
    term_id: i64,
    term: String,
    #[serde(default)]
    pt_id: Option<i64>,
    #[serde(default)]
    pt_term: Option<String>,
    #[serde(default)]
    label: Option<EventLabel>,
    context: String,
}

impl From<RecordRow> for ContextRecord {
    fn from(row: RecordRow) -> Self {
        Self {
            match_id: row.match_id,
            text_id: DocumentId::from_field(&row.text_id),
            term_id: row.term_id,
            term: row.term,
            pt_id: row.pt_id,
            pt_term: row.pt_term,
            label: row.label,
            context: row.context,
        }
    }
}

/// Read context records back from a CSV written by [`write_records`].
pub fn read_records(path: &Path) -> Result<Vec<ContextRecord>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("open {}", path.display()))?;
    let mut records = Vec::new();
    for (idx, row) in reader.deserialize::<RecordRow>().enumerate() {
        let row = row.with_context(|| format!("read {} record {}", path.display(), idx + 1))?;
        records.push(ContextRecord::from(row));
    }
    info!(path = %path.display(), rows = records.len(), "loaded context records");
    Ok(records)
}

pub fn write_scores(scores: &[TermScore], path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    for score in scores {
        writer.serialize(score)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = scores.len(), "wrote term scores");
    Ok(())
}

pub fn write_manifest(manifest: &RunManifest, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(file, manifest)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
