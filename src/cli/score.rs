//! CLI entry-point for aggregating classifier predictions.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{config::Settings, scoring};

/// Args for the `score` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Context records CSV written by `contexts`.
    #[arg(long)]
    pub contexts: PathBuf,
    /// Header-less `Pred0,Pred1` results file, one row per context record.
    #[arg(long)]
    pub predictions: PathBuf,
    /// Mean event probability required to keep a term (defaults to PREDICTION_THRESHOLD).
    #[arg(long)]
    pub threshold: Option<f64>,
    /// Output CSV (defaults to OUTPUTS_DIR/term_scores.csv).
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let threshold = args.threshold.unwrap_or(settings.prediction_threshold);
    let out = args
        .out
        .unwrap_or_else(|| settings.join_output("term_scores.csv"));
    let output = out.clone();
    let kept = tokio::task::spawn_blocking(move || {
        scoring::score_predictions(&args.contexts, &args.predictions, threshold, &output)
    })
    .await??;
    info!(kept, path = %out.display(), "scoring finished");
    Ok(())
}
