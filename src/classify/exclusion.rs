// src/classify/exclusion.rs
use super::contains_any;

/// Deny-list veto for commercial / lifestyle noise.
#[derive(Debug, Clone)]
pub struct ExclusionClassifier {
    terms: Vec<String>,
}

impl ExclusionClassifier {
    pub fn new(terms: Vec<String>) -> Self {
        Self { terms }
    }

    pub fn is_excluded(&self, text: &str) -> bool {
        contains_any(text, &self.terms)
    }
}
