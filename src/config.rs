//! Runtime configuration utilities for ade-context.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::nlp::window::ContextSettings;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Total words in each context window.
    pub nwords: usize,
    /// Share of the word budget taken before the match.
    pub prop_before: f64,
    /// Shortest vocabulary term, in characters, that is searched for.
    pub min_term_length: usize,
    /// Mean `p_is_event` a term must exceed to be called an adverse event.
    pub prediction_threshold: f64,
    /// Field delimiter of vocabulary files.
    pub vocab_delimiter: char,
    /// Root folder for input artefacts.
    pub data_dir: PathBuf,
    /// Root folder for generated outputs.
    pub outputs_dir: PathBuf,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let nwords = parse_env("CONTEXT_NWORDS").unwrap_or(125);
        let prop_before = parse_env("CONTEXT_PROP_BEFORE").unwrap_or(0.125);
        let min_term_length = parse_env("MIN_TERM_LENGTH").unwrap_or(5);
        let prediction_threshold = parse_env("PREDICTION_THRESHOLD").unwrap_or(0.5);
        let vocab_delimiter = parse_env("VOCAB_DELIMITER").unwrap_or('|');
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./outputs"));

        std::fs::create_dir_all(&data_dir).context("creating data dir")?;
        std::fs::create_dir_all(&outputs_dir).context("creating outputs dir")?;

        Ok(Self {
            nwords,
            prop_before,
            min_term_length,
            prediction_threshold,
            vocab_delimiter,
            data_dir,
            outputs_dir,
        })
    }

    /// Window settings with per-run overrides applied.
    pub fn context_settings(
        &self,
        nwords: Option<usize>,
        prop_before: Option<f64>,
    ) -> anyhow::Result<ContextSettings> {
        let settings = ContextSettings::new(
            nwords.unwrap_or(self.nwords),
            prop_before.unwrap_or(self.prop_before),
        )?;
        Ok(settings)
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
