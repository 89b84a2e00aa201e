//! CLI entry-point for context construction.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    cli::{OutputFormat, VocabArgs},
    config::Settings,
    data::reference::ReferenceOptions,
    nlp::{self, ContextJob},
};

/// Args for the `contexts` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[command(flatten)]
    pub vocab: VocabArgs,
    /// JSON-lines document file, or a directory of parsed label JSON files.
    #[arg(long)]
    pub documents: PathBuf,
    /// Label section to read from label JSON files.
    #[arg(long, default_value = "AR")]
    pub section: String,
    /// Words per context window (defaults to CONTEXT_NWORDS).
    #[arg(long)]
    pub nwords: Option<usize>,
    /// Share of the window taken before the match (defaults to CONTEXT_PROP_BEFORE).
    #[arg(long)]
    pub prop_before: Option<f64>,
    /// Annotation file; labels each record `is_event` or `not_event` for training.
    #[arg(long)]
    pub reference: Option<PathBuf>,
    /// Reference column holding the document id.
    #[arg(long, default_value = "text_id")]
    pub reference_id_column: String,
    /// Reference column holding the annotated term string.
    #[arg(long, default_value = "term")]
    pub reference_term_column: String,
    /// Reference column holding the annotated term code, if present.
    #[arg(long, default_value = "term_id")]
    pub reference_code_column: String,
    /// Drop matches whose window exceeds the word budget.
    #[arg(long)]
    pub strict: bool,
    /// Scan documents on all cores.
    #[arg(long)]
    pub parallel: bool,
    /// Output file format; inferred from --out when omitted.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
    /// Output file (defaults to a name under OUTPUTS_DIR).
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let context = settings
        .context_settings(args.nwords, args.prop_before)?
        .with_strict(args.strict);
    let format = args
        .format
        .or_else(|| args.out.as_deref().map(OutputFormat::from_path))
        .unwrap_or(OutputFormat::Csv);
    let out = args.out.clone().unwrap_or_else(|| {
        settings.join_output(format!(
            "sentences_nwords{}_{}.{}",
            context.nwords,
            args.section,
            format.extension()
        ))
    });

    let vocab_options = args.vocab.options(&settings)?;
    let reference_options = ReferenceOptions {
        delimiter: vocab_options.delimiter,
        text_id_column: args.reference_id_column,
        term_column: args.reference_term_column,
        term_id_column: args.reference_code_column,
    };
    let job = ContextJob {
        vocabulary: args.vocab.vocab.clone(),
        vocab_options,
        documents: args.documents,
        section: args.section,
        reference: args.reference,
        reference_options,
        settings: context,
        parallel: args.parallel,
        format,
        out,
    };
    tokio::task::spawn_blocking(move || nlp::construct_contexts(job)).await??;
    Ok(())
}
