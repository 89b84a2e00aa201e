//! Error taxonomy for matching, windowing and assembly.

use thiserror::Error;

use crate::nlp::assemble::DocumentId;

/// Failures raised by the matching and context-window layer.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The vocabulary handed to the matcher contained no terms.
    #[error("vocabulary is empty; at least one term is required to build a matcher")]
    EmptyVocabulary,

    /// A term with empty text would match at every offset.
    #[error("term {term_id} has empty text")]
    EmptyTerm { term_id: i64 },

    /// Window proportion outside of `[0, 1]`.
    #[error("prop_before must lie within [0, 1], got {0}")]
    InvalidProportion(f64),

    /// Document text was missing or unreadable.
    #[error("document {text_id} has no readable text")]
    MalformedDocument { text_id: DocumentId },

    /// Match offsets do not fit the text they were paired with.
    #[error("match {start}..={end} lies outside text of {len} bytes")]
    OffsetOutOfRange { start: usize, end: usize, len: usize },

    /// Strict windowing produced more tokens than the configured budget allows.
    #[error("context for '{term}' has {tokens} tokens, limit is {limit}")]
    WindowTooLong {
        term: String,
        tokens: usize,
        limit: usize,
    },

    /// Classifier output does not line up with its input contexts.
    #[error("classifier returned {actual} predictions for {expected} contexts")]
    PredictionCount { expected: usize, actual: usize },

    /// The automaton builder rejected the vocabulary.
    #[error("failed to build term automaton: {0}")]
    Automaton(#[from] aho_corasick::BuildError),
}
