// src/search/naver.rs
//! Naver blog search (`/v1/search/blog.json`) over reqwest.

use std::time::Duration;

use anyhow::Context;
use metrics::counter;

use super::{SearchError, SearchProvider, SearchRequest, SearchResponse};
use crate::config::{MAX_DISPLAY, MAX_START};

pub const DEFAULT_NAVER_BLOG_URL: &str = "https://openapi.naver.com/v1/search/blog.json";

pub const ENV_CLIENT_ID: &str = "NAVER_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "NAVER_CLIENT_SECRET";
pub const ENV_BLOG_URL: &str = "NAVER_BLOG_URL";

// Left in sample .env files by people who haven't filled them in.
const PLACEHOLDER_MARKER: &str = "여기에_";

// Bodies of failed responses are kept for logs only.
const ERROR_BODY_CAP: usize = 300;

#[derive(Clone, Default)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Read from env; absent vars become empty strings and fail `is_usable`.
    pub fn from_env() -> Self {
        Self {
            client_id: std::env::var(ENV_CLIENT_ID).unwrap_or_default(),
            client_secret: std::env::var(ENV_CLIENT_SECRET).unwrap_or_default(),
        }
    }

    pub fn is_usable(&self) -> bool {
        let id = self.client_id.trim();
        let secret = self.client_secret.trim();
        !id.is_empty() && !secret.is_empty() && !id.contains(PLACEHOLDER_MARKER)
    }
}

pub struct NaverBlogProvider {
    http: reqwest::Client,
    url: String,
    credentials: Credentials,
}

impl NaverBlogProvider {
    pub fn new(url: impl Into<String>, credentials: Credentials) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("busan-events/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(10))
            .build()
            .context("building reqwest client")?;
        Ok(Self {
            http,
            url: url.into(),
            credentials,
        })
    }

    /// Credentials from `NAVER_CLIENT_ID` / `NAVER_CLIENT_SECRET`,
    /// endpoint from `NAVER_BLOG_URL` or the public API.
    pub fn from_env() -> anyhow::Result<Self> {
        let url = std::env::var(ENV_BLOG_URL)
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NAVER_BLOG_URL.to_string());
        let credentials = Credentials::from_env();
        if !credentials.is_usable() {
            tracing::warn!("Naver credentials missing; searches will return a configuration error");
        }
        Self::new(url, credentials)
    }
}

/// Connect, send and body-read failures all count as transport errors.
fn transport_error(e: reqwest::Error) -> SearchError {
    tracing::warn!(error = ?e, provider = "naver_blog", "provider http error");
    counter!("search_upstream_errors_total", "kind" => "transport").increment(1);
    SearchError::Transport(e)
}

#[async_trait::async_trait]
impl SearchProvider for NaverBlogProvider {
    async fn search(&self, req: &SearchRequest) -> Result<SearchResponse, SearchError> {
        if !self.credentials.is_usable() {
            return Err(SearchError::MissingCredentials);
        }

        let display = req.display.clamp(1, MAX_DISPLAY).to_string();
        let start = req.start.clamp(1, MAX_START).to_string();
        let params = [
            ("query", req.query.as_str()),
            ("display", display.as_str()),
            ("start", start.as_str()),
            ("sort", req.sort.as_str()),
        ];

        let resp = self
            .http
            .get(&self.url)
            .header("X-Naver-Client-Id", &self.credentials.client_id)
            .header("X-Naver-Client-Secret", &self.credentials.client_secret)
            .query(&params)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        let body = resp.text().await.map_err(transport_error)?;

        if !status.is_success() {
            counter!("search_upstream_errors_total", "kind" => "status").increment(1);
            let body: String = body.chars().take(ERROR_BODY_CAP).collect();
            tracing::warn!(status = status.as_u16(), %body, "provider non-2xx");
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            counter!("search_upstream_errors_total", "kind" => "decode").increment(1);
            SearchError::Decode(e)
        })
    }

    fn name(&self) -> &'static str {
        "naver_blog"
    }
}
