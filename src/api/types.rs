//! Shared DTOs for JSON requests and responses.

use serde::{Deserialize, Serialize};

use crate::nlp::assemble::Document;

#[derive(Debug, Clone, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub terms: usize,
}

/// Body of `POST /contexts`. Window overrides fall back to server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ContextRequest {
    pub documents: Vec<Document>,
    #[serde(default)]
    pub nwords: Option<usize>,
    #[serde(default)]
    pub prop_before: Option<f64>,
}
