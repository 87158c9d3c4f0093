// src/query.rs
//! Upstream query construction: keep the user's wording, pin it to the root place,
//! add topical terms only for generic queries, and push the deny-list upstream.

use crate::classify::RelevanceClassifier;
use crate::config::FilterConfig;

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    root: String,
    default_query: String,
    topical: RelevanceClassifier,
    forced: Vec<String>,
    exclude: Vec<String>,
}

impl QueryBuilder {
    pub fn from_config(cfg: &FilterConfig) -> Self {
        Self {
            root: cfg.place.root.clone(),
            default_query: cfg.default_query().to_string(),
            topical: RelevanceClassifier::new(
                cfg.keywords.include.clone(),
                cfg.keywords.venue_hints.clone(),
            ),
            forced: cfg.keywords.forced.clone(),
            exclude: cfg.keywords.exclude.clone(),
        }
    }

    /// Build the upstream search string for a raw user query.
    pub fn build(&self, raw: &str) -> String {
        let mut q = raw.trim().to_string();
        if q.is_empty() {
            q = self.default_query.clone();
        }
        if !q.contains(&self.root) {
            q = format!("{} {}", self.root, q);
        }

        let specific = self.topical.is_topical(&q) || self.topical.names_venue(&q);
        let mut parts = vec![q];
        if !specific {
            parts.extend(self.forced.iter().cloned());
        }
        parts.extend(self.exclude.iter().map(|w| format!("-{w}")));
        parts.join(" ")
    }
}
