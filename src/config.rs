// src/config.rs
//! Filter configuration: root place, keyword sets, district catalog, search paging.
//! Loaded from TOML; the repo copy under `config/busan.toml` is embedded as the default.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const ENV_EVENTS_CONFIG_PATH: &str = "EVENTS_CONFIG_PATH";

const EMBEDDED_CONFIG: &str = include_str!("../config/busan.toml");

pub const MAX_DISPLAY: u32 = 100;
pub const MAX_START: u32 = 1000;

#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    pub place: PlaceSection,
    #[serde(default)]
    pub keywords: KeywordSection,
    #[serde(default)]
    pub relevance: RelevanceSection,
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub districts: Vec<DistrictCfg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSection {
    pub root: String,
    /// Used when the user query is blank. Falls back to `root`.
    #[serde(default)]
    pub default_query: Option<String>,
    #[serde(default = "default_unknown_label")]
    pub unknown_label: String,
    #[serde(default = "default_all_label")]
    pub all_label: String,
}

fn default_unknown_label() -> String {
    "기타".to_string()
}
fn default_all_label() -> String {
    "전체".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeywordSection {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub venue_hints: Vec<String>,
    #[serde(default)]
    pub forced: Vec<String>,
}

/// Which query string decides the relevance classifier's relaxed mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelaxOn {
    #[default]
    UserQuery,
    BuiltQuery,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelevanceSection {
    #[serde(default)]
    pub relax_on: RelaxOn,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSection {
    #[serde(default = "default_display")]
    pub display: u32,
    #[serde(default = "default_start")]
    pub start: u32,
}

fn default_display() -> u32 {
    60
}
fn default_start() -> u32 {
    1
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            display: default_display(),
            start: default_start(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistrictCfg {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl FilterConfig {
    /// The built-in Busan configuration.
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(EMBEDDED_CONFIG).context("parsing embedded config/busan.toml")
    }

    /// Load from `$EVENTS_CONFIG_PATH` when set, otherwise the embedded default.
    pub fn load() -> Result<Self> {
        match std::env::var(ENV_EVENTS_CONFIG_PATH) {
            Ok(p) => {
                let path = PathBuf::from(p);
                info!(path = %path.display(), "loading filter config from env path");
                Self::from_path(&path)
            }
            Err(_) => Self::embedded(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading filter config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing filter config {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut cfg: FilterConfig = toml::from_str(s)?;
        cfg.sanitize();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Query used for a blank user query.
    pub fn default_query(&self) -> &str {
        match self.place.default_query.as_deref() {
            Some(q) if !q.trim().is_empty() => q.trim(),
            _ => &self.place.root,
        }
    }

    /// Canonical district names in catalog order.
    pub fn district_names(&self) -> Vec<String> {
        self.districts.iter().map(|d| d.name.clone()).collect()
    }

    fn sanitize(&mut self) {
        self.place.root = self.place.root.trim().to_string();
        clean_terms(&mut self.keywords.include);
        clean_terms(&mut self.keywords.exclude);
        clean_terms(&mut self.keywords.venue_hints);
        clean_terms(&mut self.keywords.forced);
        for d in &mut self.districts {
            d.name = d.name.trim().to_string();
            clean_terms(&mut d.aliases);
        }
        self.search.display = self.search.display.clamp(1, MAX_DISPLAY);
        self.search.start = self.search.start.clamp(1, MAX_START);
    }

    fn validate(&self) -> Result<()> {
        if self.place.root.is_empty() {
            return Err(anyhow!("place.root must not be empty"));
        }
        let mut seen = HashSet::new();
        for d in &self.districts {
            if d.name.is_empty() {
                return Err(anyhow!("district with empty name"));
            }
            if !seen.insert(d.name.as_str()) {
                return Err(anyhow!("duplicate district `{}`", d.name));
            }
        }
        for (key, label) in [
            ("unknown_label", &self.place.unknown_label),
            ("all_label", &self.place.all_label),
        ] {
            if seen.contains(label.as_str()) {
                return Err(anyhow!("{key} `{label}` collides with a district name"));
            }
        }
        Ok(())
    }
}

/// Trim, drop empties, drop repeats; keeps first-seen order.
fn clean_terms(items: &mut Vec<String>) {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for it in items.drain(..) {
        let t = it.trim();
        if !t.is_empty() && seen.insert(t.to_string()) {
            out.push(t.to_string());
        }
    }
    *items = out;
}
