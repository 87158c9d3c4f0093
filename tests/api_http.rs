// tests/api_http.rs
//
// HTTP-level tests for the public Router without opening sockets.
// The Naver provider is replaced by an in-memory fixture.

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use busan_events::api::{self, AppState};
use busan_events::search::{FixtureProvider, RawHit};
use busan_events::FilterConfig;

const BODY_LIMIT: usize = 1024 * 1024;

fn hit(title: &str, desc: &str, postdate: Option<&str>) -> RawHit {
    RawHit {
        title: Some(title.into()),
        description: Some(desc.into()),
        link: Some(format!("https://blog.naver.com/u/{}", title.len())),
        postdate: postdate.map(str::to_string),
    }
}

fn router_with(provider: FixtureProvider) -> Router {
    let cfg = FilterConfig::embedded().expect("embedded config");
    api::router(AppState::with_provider(cfg, Arc::new(provider)))
}

/// Percent-encode a query value (UTF-8 bytes outside the unreserved set).
fn enc(s: &str) -> String {
    let mut out = String::new();
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() || b"-_.~".contains(&b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build GET");
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    (status, String::from_utf8(bytes).expect("utf8"))
}

#[tokio::test]
async fn health_returns_ok() {
    let (status, body) = get(router_with(FixtureProvider::with_hits(vec![])), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.trim(), "OK");
}

#[tokio::test]
async fn events_json_runs_the_fireworks_scenario() {
    let app = router_with(FixtureProvider::with_hits(vec![hit(
        "부산 해운대 불꽃축제 현장",
        "정말 멋진 불꽃놀이였어요",
        Some("20230101"),
    )]));
    let uri = format!("/api/events?q={}", enc("부산 해운대 불꽃축제"));
    let (status, body) = get(app, &uri).await;
    assert_eq!(status, StatusCode::OK);

    let v: Json = serde_json::from_str(&body).expect("json");
    let events = v["events"].as_array().expect("events array");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["district"], "해운대구");
    assert_eq!(events[0]["source"], "NAVER_BLOG_API");
    assert_eq!(events[0]["postdate"], "20230101");
    assert_eq!(v["query"], "부산 해운대 불꽃축제");
    assert_eq!(v["district"], "전체");
    assert_eq!(v["sort"], "sim");
    assert!(v["error"].is_null());
    assert_eq!(v["districts"][0], "전체");
}

#[tokio::test]
async fn events_json_honours_sort_and_district() {
    let app = router_with(FixtureProvider::with_hits(vec![
        hit("부산 영도 전시", "", Some("20230101")),
        hit("부산 서면 전시", "", None),
        hit("부산 영도 공연", "", Some("20240101")),
    ]));
    let uri = format!(
        "/api/events?q={}&gu={}&sort=latest",
        enc("부산 전시"),
        enc("영도구")
    );
    let (_, body) = get(app, &uri).await;
    let v: Json = serde_json::from_str(&body).expect("json");
    let titles: Vec<&str> = v["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["부산 영도 공연", "부산 영도 전시"]);
    assert_eq!(v["sort"], "latest");
    assert_eq!(v["district"], "영도구");
}

#[tokio::test]
async fn upstream_error_is_reported_not_raised() {
    let (status, body) = get(router_with(FixtureProvider::failing(500)), "/api/events").await;
    assert_eq!(status, StatusCode::OK);
    let v: Json = serde_json::from_str(&body).expect("json");
    assert_eq!(v["events"].as_array().unwrap().len(), 0);
    assert_eq!(v["error"], "search provider returned HTTP 500");
    assert_eq!(v["query"], "부산");
}

#[tokio::test]
async fn index_renders_html_page() {
    let app = router_with(FixtureProvider::with_hits(vec![hit(
        "<b>부산</b> 시립미술관 전시",
        "현대미술 &amp; 사진",
        Some("20240105"),
    )]));
    let (status, body) = get(app, "/?sort=latest").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("<!doctype html>"));
    assert!(body.contains("부산 시립미술관 전시"));
    assert!(body.contains("현대미술 &amp; 사진"));
    assert!(body.contains("2024.01.05"));
    assert!(body.contains("<option value=\"latest\" selected>"));
}

#[tokio::test]
async fn index_shows_configuration_error() {
    let (status, body) = get(router_with(FixtureProvider::unconfigured()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("NAVER_CLIENT_ID"));
}
