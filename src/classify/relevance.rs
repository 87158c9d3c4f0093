// src/classify/relevance.rs
//! Culture/arts topical filter with a query-level relaxed mode.

use super::contains_any;

/// Decided once per request from the effective query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelevanceMode {
    /// The query already names a topic or venue: every text passes.
    Relaxed,
    /// Text must contain a topical-include term.
    Strict,
}

#[derive(Debug, Clone)]
pub struct RelevanceClassifier {
    include: Vec<String>,
    venue_hints: Vec<String>,
}

impl RelevanceClassifier {
    pub fn new(include: Vec<String>, venue_hints: Vec<String>) -> Self {
        Self {
            include,
            venue_hints,
        }
    }

    /// Topical predicate: contains any include term.
    pub fn is_topical(&self, text: &str) -> bool {
        contains_any(text, &self.include)
    }

    pub fn names_venue(&self, text: &str) -> bool {
        contains_any(text, &self.venue_hints)
    }

    pub fn mode_for(&self, effective_query: &str) -> RelevanceMode {
        let q = effective_query.trim();
        if self.is_topical(q) || self.names_venue(q) {
            RelevanceMode::Relaxed
        } else {
            RelevanceMode::Strict
        }
    }

    pub fn passes(&self, mode: RelevanceMode, text: &str) -> bool {
        match mode {
            RelevanceMode::Relaxed => true,
            RelevanceMode::Strict => self.is_topical(text),
        }
    }
}
