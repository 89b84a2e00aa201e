//! Aho-Corasick term matcher over a fixed adverse-event vocabulary.
//!
//! The automaton is built once per vocabulary and never mutated afterwards, so a
//! single `TermMatcher` can sit behind an `Arc` and serve any number of scans
//! concurrently. Matching is plain substring search: a term found inside a longer
//! word is still reported, and no case folding happens here.

use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::nlp::error::ContextError;

/// MedDRA preferred term a lower level term rolls up to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredTerm {
    pub id: i64,
    pub name: String,
}

/// One vocabulary entry, e.g. a MedDRA lower level term and its code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub text: String,
    pub id: i64,
    #[serde(default)]
    pub preferred: Option<PreferredTerm>,
}

impl Term {
    pub fn new(text: impl Into<String>, id: i64) -> Self {
        Self {
            text: text.into(),
            id,
            preferred: None,
        }
    }

    pub fn with_preferred(mut self, id: i64, name: impl Into<String>) -> Self {
        self.preferred = Some(PreferredTerm {
            id,
            name: name.into(),
        });
        self
    }
}

/// Occurrence of a vocabulary term inside a document.
///
/// Offsets are byte offsets into the scanned text and `end` points at the last
/// matched byte, so `&text[start..=end] == term`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermMatch {
    pub term_id: i64,
    pub term: String,
    pub start: usize,
    pub end: usize,
    pub preferred: Option<PreferredTerm>,
}

impl TermMatch {
    /// Offset of the first byte following the match.
    pub fn end_exclusive(&self) -> usize {
        self.end + 1
    }
}

/// Multi-pattern matcher reporting every occurrence of every term.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    automaton: AhoCorasick,
    terms: Vec<Term>,
}

impl TermMatcher {
    /// Build the automaton in time linear in the combined term length.
    pub fn build(terms: Vec<Term>) -> Result<Self, ContextError> {
        if terms.is_empty() {
            return Err(ContextError::EmptyVocabulary);
        }
        if let Some(term) = terms.iter().find(|term| term.text.is_empty()) {
            return Err(ContextError::EmptyTerm { term_id: term.id });
        }

        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(terms.iter().map(|term| term.text.as_str()))?;
        debug!(
            terms = terms.len(),
            memory = automaton.memory_usage(),
            "built term automaton"
        );
        Ok(Self { automaton, terms })
    }

    /// Find all matches in `text`, ordered by ascending end offset.
    ///
    /// Matches sharing an end offset come longest first, then in vocabulary order.
    pub fn scan(&self, text: &str) -> Vec<TermMatch> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut found: Vec<(usize, usize, usize)> = self
            .automaton
            .find_overlapping_iter(text)
            .map(|m| (m.start(), m.end(), m.pattern().as_usize()))
            .collect();
        // The automaton reports matches by ascending end, but the order among
        // matches sharing an end is not part of the crate's contract. The input
        // is already in runs, so the stable sort is close to linear.
        found.sort_by_key(|&(start, end, pattern)| (end, start, pattern));

        found
            .into_iter()
            .map(|(start, end, pattern)| {
                let term = &self.terms[pattern];
                TermMatch {
                    term_id: term.id,
                    term: term.text.clone(),
                    start,
                    end: end - 1,
                    preferred: term.preferred.clone(),
                }
            })
            .collect()
    }

    /// Vocabulary the automaton was built from, in insertion order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// First vocabulary entry carrying `term_id`.
    pub fn term(&self, term_id: i64) -> Option<&Term> {
        self.terms.iter().find(|t| t.id == term_id)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
