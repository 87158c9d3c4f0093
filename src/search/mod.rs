// src/search/mod.rs
//! Upstream blog-search collaborator: request/response types, provider trait, errors.

pub mod fixture;
pub mod naver;

use serde::{Deserialize, Serialize};

pub use fixture::FixtureProvider;
pub use naver::{Credentials, NaverBlogProvider};

/// One upstream hit as returned by the provider. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// `YYYYMMDD`, only sometimes present.
    #[serde(default)]
    pub postdate: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub items: Vec<RawHit>,
}

/// Ordering requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamSort {
    Sim,
    Date,
}

impl UpstreamSort {
    pub fn as_str(self) -> &'static str {
        match self {
            UpstreamSort::Sim => "sim",
            UpstreamSort::Date => "date",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub display: u32,
    pub start: u32,
    pub sort: UpstreamSort,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("NAVER_CLIENT_ID / NAVER_CLIENT_SECRET are not configured")]
    MissingCredentials,
    #[error("search request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("search provider returned HTTP {status}")]
    Status { status: u16, body: String },
    #[error("malformed search response: {0}")]
    Decode(#[source] serde_json::Error),
}

#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, req: &SearchRequest) -> Result<SearchResponse, SearchError>;
    fn name(&self) -> &'static str;
}
