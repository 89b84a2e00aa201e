//! Term matching and context-window orchestration layer.

pub mod assemble;
pub mod classifier;
pub mod error;
pub mod label;
pub mod matcher;
pub mod window;

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::{
    cli::OutputFormat,
    data::{self, reference::ReferenceOptions, store::RunManifest, vocab::VocabOptions},
};

use self::{
    assemble::{ContextAssembler, RunSummary},
    matcher::TermMatcher,
    window::ContextSettings,
};

/// Inputs for one context-construction run.
#[derive(Debug, Clone)]
pub struct ContextJob {
    pub vocabulary: PathBuf,
    pub vocab_options: VocabOptions,
    pub documents: PathBuf,
    pub section: String,
    /// Annotation file; when set, records are labelled for training.
    pub reference: Option<PathBuf>,
    pub reference_options: ReferenceOptions,
    pub settings: ContextSettings,
    pub parallel: bool,
    pub format: OutputFormat,
    pub out: PathBuf,
}

/// Load the vocabulary and build the shared automaton.
pub fn load_matcher(path: &std::path::Path, options: &VocabOptions) -> Result<Arc<TermMatcher>> {
    let terms = data::vocab::load_terms(path, options)?;
    let matcher = TermMatcher::build(terms)?;
    info!(terms = matcher.len(), "term matcher ready");
    Ok(Arc::new(matcher))
}

/// Run the end-to-end context construction pipeline and persist its output.
///
/// Blocking; async callers should run it on the blocking pool.
pub fn construct_contexts(job: ContextJob) -> Result<RunSummary> {
    info!(
        documents = %job.documents.display(),
        nwords = job.settings.nwords,
        prop_before = job.settings.prop_before,
        "starting context construction"
    );
    let matcher = load_matcher(&job.vocabulary, &job.vocab_options)?;
    let terms = matcher.len();
    let assembler = ContextAssembler::new(matcher, job.settings)?;
    let mut documents = data::documents::load_documents(&job.documents, &job.section)?;
    let reference = job
        .reference
        .as_deref()
        .map(|path| data::reference::load_reference(path, &job.reference_options))
        .transpose()?;
    if let Some(reference) = &reference {
        documents = reference.retain_annotated(documents);
    }

    let mut report = if job.parallel {
        assembler.assemble_parallel(&documents)
    } else {
        assembler.assemble(&documents)
    };
    if let Some(reference) = &reference {
        label::label_records(&mut report.records, reference);
    }
    let summary = report.summary();
    summary.log();

    data::store::write_records(&report.records, &job.out, job.format)?;
    let manifest = RunManifest {
        generated_at: Utc::now(),
        vocabulary: job.vocabulary.display().to_string(),
        documents: job.documents.display().to_string(),
        section: job.section.clone(),
        terms,
        reference: job.reference.as_ref().map(|p| p.display().to_string()),
        settings: job.settings,
        summary,
    };
    data::store::write_manifest(&manifest, &job.out.with_extension("manifest.json"))?;
    Ok(summary)
}
