//! Context-window construction around a matched term.
//!
//! The window layout is `term before.. EVENT after..`: the matched term is
//! prepended so the classifier knows which mention is under evaluation, and the
//! mention itself is replaced by a fixed placeholder. Window sizes are derived
//! from the word budget exactly as the trained models expect, including the
//! truncation and the clamp to at least one word on either side.

use serde::{Deserialize, Serialize};

use crate::nlp::{error::ContextError, matcher::TermMatch};

/// Token that stands in for the matched span.
pub const EVENT_PLACEHOLDER: &str = "EVENT";

/// Window sizing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextSettings {
    /// Target number of words in the assembled string.
    pub nwords: usize,
    /// Share of the non-term word budget taken from before the match.
    pub prop_before: f64,
    /// Reject windows longer than `nwords + term_nwords` tokens.
    pub strict: bool,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            nwords: 125,
            prop_before: 0.125,
            strict: false,
        }
    }
}

impl ContextSettings {
    /// Validated settings with strict mode off.
    pub fn new(nwords: usize, prop_before: f64) -> Result<Self, ContextError> {
        let settings = Self {
            nwords,
            prop_before,
            strict: false,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn validate(&self) -> Result<(), ContextError> {
        if (0.0..=1.0).contains(&self.prop_before) {
            Ok(())
        } else {
            Err(ContextError::InvalidProportion(self.prop_before))
        }
    }
}

/// Number of words kept before and after a match of `term_nwords` words.
pub fn window_sizes(term_nwords: usize, settings: &ContextSettings) -> (usize, usize) {
    let budget = (settings.nwords as i64 - 2 * term_nwords as i64) as f64;
    // `as i64` truncates toward zero; negative budgets end up at the clamp.
    let before = (settings.prop_before * budget) as i64;
    let after = ((1.0 - settings.prop_before) * budget) as i64;
    (before.max(1) as usize, after.max(1) as usize)
}

/// Assemble the classifier input string for one match of `text`.
pub fn build_context(
    text: &str,
    found: &TermMatch,
    settings: &ContextSettings,
) -> Result<String, ContextError> {
    let out_of_range = || ContextError::OffsetOutOfRange {
        start: found.start,
        end: found.end,
        len: text.len(),
    };
    let prefix = text.get(..found.start).ok_or_else(out_of_range)?;
    let suffix = text.get(found.end_exclusive()..).ok_or_else(out_of_range)?;

    let term_nwords = found.term.split_whitespace().count();
    let (n_before, n_after) = window_sizes(term_nwords, settings);

    let before: Vec<&str> = prefix.split_whitespace().collect();
    let before = &before[before.len().saturating_sub(n_before)..];

    let mut words: Vec<&str> = Vec::with_capacity(before.len() + n_after + 2);
    words.push(found.term.as_str());
    words.extend_from_slice(before);
    words.push(EVENT_PLACEHOLDER);
    words.extend(suffix.split_whitespace().take(n_after));
    let context = words.join(" ");

    if settings.strict {
        let tokens = context.split_whitespace().count();
        let limit = settings.nwords + term_nwords;
        if tokens > limit {
            return Err(ContextError::WindowTooLong {
                term: found.term.clone(),
                tokens,
                limit,
            });
        }
    }
    Ok(context)
}
