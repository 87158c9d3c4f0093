// src/classify/district.rs
use crate::config::FilterConfig;

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    aliases: Vec<String>,
}

/// Maps text to a canonical district name, or the unknown label.
/// Catalog order is the lookup order.
#[derive(Debug, Clone)]
pub struct DistrictTagger {
    entries: Vec<Entry>,
    unknown: String,
}

impl DistrictTagger {
    pub fn new(catalog: Vec<(String, Vec<String>)>, unknown: String) -> Self {
        let entries = catalog
            .into_iter()
            .map(|(name, aliases)| Entry { name, aliases })
            .collect();
        Self { entries, unknown }
    }

    pub fn from_config(cfg: &FilterConfig) -> Self {
        let catalog = cfg
            .districts
            .iter()
            .map(|d| (d.name.clone(), d.aliases.clone()))
            .collect();
        Self::new(catalog, cfg.place.unknown_label.clone())
    }

    pub fn unknown_label(&self) -> &str {
        &self.unknown
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    /// Canonical names first, then alias sets, each in catalog order.
    pub fn tag(&self, text: &str) -> &str {
        if let Some(e) = self.entries.iter().find(|e| text.contains(&e.name)) {
            return &e.name;
        }
        self.entries
            .iter()
            .find(|e| e.aliases.iter().any(|a| !a.is_empty() && text.contains(a)))
            .map(|e| e.name.as_str())
            .unwrap_or(self.unknown.as_str())
    }
}
