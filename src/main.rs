//! Entry point wiring CLI dispatch to pipeline modules.

use ade_context::{cli::Cli, config::Settings, logging};
use anyhow::Result;
use tracing::{info, instrument};

#[tokio::main]
#[instrument]
async fn main() -> Result<()> {
    logging::init_tracing()?;
    let settings = Settings::load()?;
    let cli = Cli::parse();

    info!(?cli, "starting command");
    cli.dispatch(settings).await
}
