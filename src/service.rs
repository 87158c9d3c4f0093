// src/service.rs
//! Request-level orchestration: build query, call the provider once, assemble,
//! sort, district-filter. Errors stop here and become `EventPage::error`.

use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::assemble::{
    assemble, filter_district, sort_events, DistrictFilter, FilterStats, NormalizedEvent, SortMode,
};
use crate::classify::Classifiers;
use crate::config::{FilterConfig, RelaxOn};
use crate::query::QueryBuilder;
use crate::search::{SearchError, SearchProvider, SearchRequest};

/// Raw request parameters (`q`, `gu`, `sort`), all optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub gu: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

/// Everything the presentation layer needs for one page.
#[derive(Debug, Clone, Serialize)]
pub struct EventPage {
    pub events: Vec<NormalizedEvent>,
    pub query: String,
    pub district: String,
    pub sort: SortMode,
    pub districts: Vec<String>,
    pub error: Option<String>,
}

pub struct EventService {
    cfg: Arc<FilterConfig>,
    classifiers: Classifiers,
    query_builder: QueryBuilder,
    provider: Arc<dyn SearchProvider>,
}

impl EventService {
    pub fn new(cfg: FilterConfig, provider: Arc<dyn SearchProvider>) -> Self {
        let classifiers = Classifiers::from_config(&cfg);
        let query_builder = QueryBuilder::from_config(&cfg);
        Self {
            cfg: Arc::new(cfg),
            classifiers,
            query_builder,
            provider,
        }
    }

    /// District choices for the UI: the all-label first, then the catalog.
    pub fn district_choices(&self) -> Vec<String> {
        std::iter::once(self.cfg.place.all_label.clone())
            .chain(self.cfg.district_names())
            .collect()
    }

    pub async fn search(&self, params: &SearchParams) -> EventPage {
        let user_query = match params.q.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => q.to_string(),
            _ => self.cfg.place.root.clone(),
        };
        let filter = DistrictFilter::parse(
            params.gu.as_deref().unwrap_or_default(),
            &self.cfg.place.all_label,
        );
        let sort = SortMode::parse(params.sort.as_deref().unwrap_or_default());

        let (events, error) = match self.fetch_events(&user_query, sort).await {
            Ok(events) => (filter_district(events, &filter), None),
            Err(e) => {
                warn!(error = %e, provider = self.provider.name(), "event search failed");
                (Vec::new(), Some(e.to_string()))
            }
        };

        EventPage {
            events,
            query: user_query,
            district: filter.label(&self.cfg.place.all_label).to_string(),
            sort,
            districts: self.district_choices(),
            error,
        }
    }

    async fn fetch_events(
        &self,
        user_query: &str,
        sort: SortMode,
    ) -> Result<Vec<NormalizedEvent>, SearchError> {
        let built = self.query_builder.build(user_query);
        let req = SearchRequest {
            query: built.clone(),
            display: self.cfg.search.display,
            start: self.cfg.search.start,
            sort: sort.upstream(),
        };
        let resp = self.provider.search(&req).await?;

        let effective = match self.cfg.relevance.relax_on {
            RelaxOn::UserQuery => user_query,
            RelaxOn::BuiltQuery => built.as_str(),
        };

        let t0 = Instant::now();
        let (events, stats) = assemble(&self.classifiers, &resp.items, user_query, effective);
        let events = sort_events(events, sort);
        histogram!("events_filter_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        record_stats(&stats);

        info!(
            target: "events",
            hits = stats.seen,
            kept = stats.kept,
            total = ?resp.total,
            sort = sort.as_str(),
            "assembled events"
        );
        Ok(events)
    }
}

fn record_stats(stats: &FilterStats) {
    counter!("events_hits_total").increment(stats.seen as u64);
    counter!("events_kept_total").increment(stats.kept as u64);
    counter!("events_rejected_total", "stage" => "locality")
        .increment(stats.rejected_locality as u64);
    counter!("events_rejected_total", "stage" => "relevance")
        .increment(stats.rejected_relevance as u64);
    counter!("events_rejected_total", "stage" => "exclusion")
        .increment(stats.rejected_exclusion as u64);
}
