//! Command-line interface wiring for ade-context.

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::Settings;

pub mod contexts;
pub mod score;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Adverse-event context builder", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Contexts(args) => contexts::run(args, settings).await,
            Commands::Score(args) => score::run(args, settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find vocabulary terms in label text and build classifier context strings.
    Contexts(contexts::Args),
    /// Aggregate classifier predictions per label and term.
    Score(score::Args),
    /// Serve the context builder over HTTP.
    Serve(serve::Args),
}

/// Vocabulary file layout shared by commands that build a matcher.
#[derive(Debug, Clone, clap::Args)]
pub struct VocabArgs {
    /// Delimited vocabulary file with a header row.
    #[arg(long)]
    pub vocab: std::path::PathBuf,
    /// Column holding the term text.
    #[arg(long, default_value = "term")]
    pub term_column: String,
    /// Column holding the term code.
    #[arg(long, default_value = "term_id")]
    pub id_column: String,
    /// Column holding the preferred-term code (requires --pt-term-column).
    #[arg(long, requires = "pt_term_column")]
    pub pt_id_column: Option<String>,
    /// Column holding the preferred-term name (requires --pt-id-column).
    #[arg(long, requires = "pt_id_column")]
    pub pt_term_column: Option<String>,
    /// Field delimiter (defaults to VOCAB_DELIMITER).
    #[arg(long)]
    pub delimiter: Option<char>,
    /// Drop terms shorter than this many characters (defaults to MIN_TERM_LENGTH).
    #[arg(long)]
    pub min_term_length: Option<usize>,
}

impl VocabArgs {
    pub fn options(&self, settings: &Settings) -> Result<crate::data::vocab::VocabOptions> {
        let delimiter = self.delimiter.unwrap_or(settings.vocab_delimiter);
        anyhow::ensure!(
            delimiter.is_ascii(),
            "vocabulary delimiter must be a single ASCII character, got '{delimiter}'"
        );
        Ok(crate::data::vocab::VocabOptions {
            delimiter: delimiter as u8,
            term_column: self.term_column.clone(),
            id_column: self.id_column.clone(),
            min_length: self.min_term_length.unwrap_or(settings.min_term_length),
            pt_id_column: self.pt_id_column.clone(),
            pt_term_column: self.pt_term_column.clone(),
        })
    }
}

/// File format for context records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }

    /// Infer the format from a file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => Self::Parquet,
            _ => Self::Csv,
        }
    }
}
