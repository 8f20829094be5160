//! Crate-level scenario tests covering the end-to-end header-to-request
//! translation, including the middleware and extractor surfaces.

use crate::{parse_watch_request, Watch, WatchLayer, WatchState, DEFAULT_TIMEOUT_MILLIS};
use axum::body::Body;
use axum::{middleware, routing::get, Extension, Router};
use http::{HeaderMap, HeaderValue, Request, StatusCode};
use std::sync::Arc;
use tower::util::ServiceExt;

fn watch_headers(revision: &'static str, prefer: Option<&'static str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("if-none-match", HeaderValue::from_static(revision));
    if let Some(prefer) = prefer {
        headers.insert("prefer", HeaderValue::from_static(prefer));
    }
    headers
}

#[test]
fn scenario_revision_and_wait() {
    let watch = parse_watch_request(&watch_headers("1-abcdef", Some("wait=30")))
        .unwrap()
        .unwrap();
    assert_eq!(watch.last_known_revision().as_str(), "1-abcdef");
    assert_eq!(watch.timeout_millis(), 30_000);
}

#[test]
fn scenario_revision_without_prefer_uses_default() {
    let watch = parse_watch_request(&watch_headers("1-abcdef", None))
        .unwrap()
        .unwrap();
    assert_eq!(watch.last_known_revision().as_str(), "1-abcdef");
    assert_eq!(watch.timeout_millis(), DEFAULT_TIMEOUT_MILLIS);
}

#[test]
fn scenario_no_headers_is_not_a_watch() {
    assert!(parse_watch_request(&HeaderMap::new()).unwrap().is_none());
}

#[test]
fn scenario_zero_wait_is_reported_with_raw_value() {
    let err = parse_watch_request(&watch_headers("1-abcdef", Some("wait=0"))).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("wait=0"), "message was: {message}");
    assert!(message.contains("expected: wait=seconds"), "message was: {message}");
}

#[test]
fn scenario_prefer_is_ignored_without_if_none_match() {
    let mut headers = HeaderMap::new();
    headers.insert("prefer", HeaderValue::from_static("wait=30"));
    assert!(parse_watch_request(&headers).unwrap().is_none());
}

async fn echo_state(Extension(state): Extension<Arc<WatchState>>) -> String {
    match &state.watch {
        Some(watch) => format!(
            "{}:{}",
            watch.last_known_revision(),
            watch.timeout_millis()
        ),
        None => "none".to_string(),
    }
}

fn layered_app() -> Router {
    let watch = WatchLayer::new();
    Router::new()
        .route("/resource", get(echo_state))
        .layer(middleware::from_fn(watch.middleware()))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn middleware_attaches_watch_state() {
    let request = Request::get("/resource")
        .header("if-none-match", "1-abcdef")
        .header("prefer", "WAIT = 45")
        .body(Body::empty())
        .unwrap();
    let response = layered_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "1-abcdef:45000");
}

#[tokio::test]
async fn middleware_attaches_empty_state_for_plain_requests() {
    let request = Request::get("/resource").body(Body::empty()).unwrap();
    let response = layered_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "none");
}

#[tokio::test]
async fn middleware_rejects_malformed_prefer_before_handler() {
    let request = Request::get("/resource")
        .header("if-none-match", "1-abcdef")
        .header("prefer", "foo=bar")
        .body(Body::empty())
        .unwrap();
    let response = layered_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_string(response).await,
        "invalid prefer header: foo=bar (expected: wait=seconds)"
    );
}

#[tokio::test]
async fn extractor_reuses_middleware_state() {
    async fn handler(Watch(watch): Watch) -> String {
        watch
            .map(|w| w.timeout_millis().to_string())
            .unwrap_or_else(|| "none".to_string())
    }

    let watch = WatchLayer::new();
    let app = Router::new()
        .route("/resource", get(handler))
        .layer(middleware::from_fn(watch.middleware()));

    let request = Request::get("/resource")
        .header("if-none-match", "1-abcdef")
        .header("prefer", "wait=5")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(body_string(response).await, "5000");
}
