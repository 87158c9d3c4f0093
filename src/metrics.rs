// src/metrics.rs
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder. Call once per process.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| anyhow::anyhow!("prometheus: install recorder: {e}"))?;

        describe_counter!("events_hits_total", "Upstream hits seen by the filter.");
        describe_counter!("events_kept_total", "Hits kept as events.");
        describe_counter!(
            "events_rejected_total",
            "Hits dropped, labelled by stage (locality|relevance|exclusion)."
        );
        describe_counter!(
            "search_upstream_errors_total",
            "Search provider failures, labelled by kind."
        );
        describe_histogram!("events_filter_ms", "Filter + sort time per request in milliseconds.");

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
