//! Seam to the external two-class event classifier.

use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::nlp::error::ContextError;

/// Class probabilities for one context string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "Pred0")]
    pub p_not_event: f64,
    #[serde(rename = "Pred1")]
    pub p_is_event: f64,
}

impl Prediction {
    pub fn new(p_not_event: f64, p_is_event: f64) -> Self {
        Self {
            p_not_event,
            p_is_event,
        }
    }
}

/// Anything that scores context strings; constructed by the caller and passed in.
pub trait EventClassifier: Send + Sync {
    /// One prediction per context, in input order.
    fn predict(&self, contexts: &[String]) -> Result<Vec<Prediction>>;
}

/// Predictions produced offline by the model and read back from disk.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedScores {
    predictions: Vec<Prediction>,
}

impl PrecomputedScores {
    pub fn new(predictions: Vec<Prediction>) -> Self {
        Self { predictions }
    }

    /// Read a header-less `Pred0,Pred1` results file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("open predictions {}", path.display()))?;
        let mut predictions = Vec::new();
        for (idx, row) in reader.deserialize::<(f64, f64)>().enumerate() {
            let (p_not_event, p_is_event) =
                row.with_context(|| format!("parse prediction row {}", idx + 1))?;
            predictions.push(Prediction::new(p_not_event, p_is_event));
        }
        info!(path = %path.display(), rows = predictions.len(), "loaded precomputed predictions");
        Ok(Self { predictions })
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}

impl EventClassifier for PrecomputedScores {
    fn predict(&self, contexts: &[String]) -> Result<Vec<Prediction>> {
        if contexts.len() != self.predictions.len() {
            return Err(ContextError::PredictionCount {
                expected: contexts.len(),
                actual: self.predictions.len(),
            }
            .into());
        }
        Ok(self.predictions.clone())
    }
}
