//! Document loading from JSON-lines files or directories of parsed labels.

use std::{collections::HashMap, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    data::normalize::normalize_text,
    nlp::assemble::{Document, DocumentId},
};

#[derive(Debug, Deserialize)]
struct DocumentLine {
    id: DocumentId,
    #[serde(default)]
    text: Option<String>,
}

/// Parsed drug label as written by the label parsers: section code to raw text.
#[derive(Debug, Deserialize)]
struct LabelFile {
    label_id: DocumentId,
    #[serde(default)]
    sections: HashMap<String, String>,
}

/// Load documents from `path`.
///
/// A directory is walked for `*.json` label files and `section` selects the text;
/// anything else is read as JSON lines of `{"id": .., "text": ..}`. Records that
/// cannot be parsed are kept as malformed documents so the run can report them.
pub fn load_documents(path: &Path, section: &str) -> Result<Vec<Document>> {
    let documents = if path.is_dir() {
        load_label_dir(path, section)?
    } else {
        load_jsonl(path)?
    };
    let malformed = documents.iter().filter(|doc| doc.text.is_none()).count();
    info!(path = %path.display(), documents = documents.len(), malformed, "loaded documents");
    Ok(documents)
}

fn load_jsonl(path: &Path) -> Result<Vec<Document>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read documents {}", path.display()))?;
    let mut documents = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<DocumentLine>(line) {
            Ok(row) => documents.push(Document {
                id: row.id,
                text: row.text.as_deref().map(normalize_text),
            }),
            Err(err) => {
                warn!(line = idx + 1, %err, "unparseable document line");
                documents.push(Document::malformed(format!("line:{}", idx + 1)));
            }
        }
    }
    Ok(documents)
}

fn load_label_dir(root: &Path, section: &str) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {}", root.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|s| s.to_str()) != Some("json")
        {
            continue;
        }
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        let label = std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|raw| serde_json::from_str::<LabelFile>(&raw).map_err(Into::into));
        match label {
            Ok(label) => match label.sections.get(section) {
                Some(text) => documents.push(Document::new(label.label_id, normalize_text(text))),
                None => debug!(label = %label.label_id, section, "label has no such section"),
            },
            Err(err) => {
                warn!(path = %path.display(), %err, "unreadable label file");
                documents.push(Document::malformed(stem));
            }
        }
    }
    Ok(documents)
}
