//! Busan culture-events finder — binary entrypoint.
//! Boots the Axum HTTP server with the Naver-backed event service and `/metrics`.

use busan_events::{api, metrics::Metrics, AppState};
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("busan_events=info,warn"));

    // Shuttle may already have installed a subscriber; ignore that case.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    // Supplies NAVER_CLIENT_ID / NAVER_CLIENT_SECRET and EVENTS_CONFIG_PATH.
    let _ = dotenvy::dotenv();

    init_tracing();

    let state = AppState::from_env().map_err(shuttle_runtime::Error::Custom)?;
    let mut router = api::create_router(state);

    match Metrics::init() {
        Ok(m) => router = router.merge(m.router()),
        Err(e) => tracing::warn!(error = ?e, "metrics disabled"),
    }

    tracing::info!("busan-events router ready");
    Ok(router.into())
}
