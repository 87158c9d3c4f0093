// src/classify/mod.rs
//! Substring classifiers over normalized hit text.
//! Matching is plain case-sensitive `str::contains`; no tokenizing, no case folding.

pub mod district;
pub mod exclusion;
pub mod locality;
pub mod relevance;

pub use district::DistrictTagger;
pub use exclusion::ExclusionClassifier;
pub use locality::LocalityClassifier;
pub use relevance::{RelevanceClassifier, RelevanceMode};

use crate::config::FilterConfig;

/// True if `text` contains any of `terms`.
pub(crate) fn contains_any<S: AsRef<str>>(text: &str, terms: &[S]) -> bool {
    terms.iter().any(|t| {
        let t = t.as_ref();
        !t.is_empty() && text.contains(t)
    })
}

/// All classifiers built from one configuration snapshot.
#[derive(Debug, Clone)]
pub struct Classifiers {
    pub locality: LocalityClassifier,
    pub relevance: RelevanceClassifier,
    pub exclusion: ExclusionClassifier,
    pub district: DistrictTagger,
}

impl Classifiers {
    pub fn from_config(cfg: &FilterConfig) -> Self {
        Self {
            locality: LocalityClassifier::from_config(cfg),
            relevance: RelevanceClassifier::new(
                cfg.keywords.include.clone(),
                cfg.keywords.venue_hints.clone(),
            ),
            exclusion: ExclusionClassifier::new(cfg.keywords.exclude.clone()),
            district: DistrictTagger::from_config(cfg),
        }
    }
}
