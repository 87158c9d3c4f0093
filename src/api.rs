// src/api.rs
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::config::FilterConfig;
use crate::render::render_page;
use crate::search::{NaverBlogProvider, SearchProvider};
use crate::service::{EventPage, EventService, SearchParams};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EventService>,
}

impl AppState {
    pub fn new(service: EventService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn with_provider(cfg: FilterConfig, provider: Arc<dyn SearchProvider>) -> Self {
        Self::new(EventService::new(cfg, provider))
    }

    /// Filter config from `EVENTS_CONFIG_PATH` (or embedded), Naver provider from env.
    pub fn from_env() -> anyhow::Result<Self> {
        let cfg = FilterConfig::load()?;
        let provider = NaverBlogProvider::from_env()?;
        Ok(Self::with_provider(cfg, Arc::new(provider)))
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/events", get(events_json))
        .route("/health", get(|| async { "OK" }))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Alias kept for `crate_root::router`.
pub fn router(state: AppState) -> Router {
    create_router(state)
}

async fn index(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Html<String> {
    let page = state.service.search(&params).await;
    Html(render_page(&page))
}

async fn events_json(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<EventPage> {
    Json(state.service.search(&params).await)
}
