// src/search/fixture.rs
//! In-memory provider for tests and offline demos.

use std::sync::Mutex;

use super::{RawHit, SearchError, SearchProvider, SearchRequest, SearchResponse};

enum Outcome {
    Hits(Vec<RawHit>),
    Status(u16),
    Unconfigured,
}

pub struct FixtureProvider {
    outcome: Outcome,
    last_request: Mutex<Option<SearchRequest>>,
}

impl FixtureProvider {
    pub fn with_hits(hits: Vec<RawHit>) -> Self {
        Self::from_outcome(Outcome::Hits(hits))
    }

    /// Parse a provider-shaped JSON body (`{"items": [...]}`).
    pub fn from_json(body: &str) -> Result<Self, SearchError> {
        let resp: SearchResponse = serde_json::from_str(body).map_err(SearchError::Decode)?;
        Ok(Self::with_hits(resp.items))
    }

    /// Every call fails with this HTTP status.
    pub fn failing(status: u16) -> Self {
        Self::from_outcome(Outcome::Status(status))
    }

    /// Every call fails as if credentials were missing.
    pub fn unconfigured() -> Self {
        Self::from_outcome(Outcome::Unconfigured)
    }

    fn from_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            last_request: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<SearchRequest> {
        self.last_request.lock().ok().and_then(|g| g.clone())
    }
}

#[async_trait::async_trait]
impl SearchProvider for FixtureProvider {
    async fn search(&self, req: &SearchRequest) -> Result<SearchResponse, SearchError> {
        if let Ok(mut g) = self.last_request.lock() {
            *g = Some(req.clone());
        }
        match &self.outcome {
            Outcome::Hits(hits) => Ok(SearchResponse {
                total: Some(hits.len() as u64),
                items: hits.iter().take(req.display as usize).cloned().collect(),
            }),
            Outcome::Status(status) => Err(SearchError::Status {
                status: *status,
                body: String::new(),
            }),
            Outcome::Unconfigured => Err(SearchError::MissingCredentials),
        }
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::UpstreamSort;

    #[tokio::test]
    async fn json_fixture_respects_display_and_records_request() {
        let p = FixtureProvider::from_json(
            r#"{"items": [{"title": "a"}, {"title": "b"}, {"title": "c"}]}"#,
        )
        .unwrap();
        let req = SearchRequest {
            query: "부산 전시".into(),
            display: 2,
            start: 1,
            sort: UpstreamSort::Sim,
        };
        let resp = p.search(&req).await.unwrap();
        assert_eq!(resp.items.len(), 2);
        assert_eq!(resp.total, Some(3));
        assert_eq!(p.last_request(), Some(req));
    }

    #[test]
    fn bad_json_fixture_is_rejected() {
        assert!(matches!(
            FixtureProvider::from_json("[1,2"),
            Err(SearchError::Decode(_))
        ));
    }
}
