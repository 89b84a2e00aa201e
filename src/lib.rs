//! Adverse-event term matching and context-window construction for drug labels.

pub mod api;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod nlp;
pub mod scoring;
