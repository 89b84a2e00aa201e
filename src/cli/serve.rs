//! CLI entry-point for serving the HTTP API.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{api, cli::VocabArgs, config::Settings, nlp};

/// Run the Axum server.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[command(flatten)]
    pub vocab: VocabArgs,
    /// Port to bind (default 8080).
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    /// Host address, defaults to localhost.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let matcher = nlp::load_matcher(&args.vocab.vocab, &args.vocab.options(&settings)?)?;
    api::serve(settings, matcher, args.host, args.port).await
}
