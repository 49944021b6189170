//! Integration tests for [`CharacterApi`] against an in-process axum server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use morty_remote::{CharacterApi, RemoteError};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Serve `router` on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn two_characters() -> serde_json::Value {
    json!({
        "info": {"count": 2, "pages": 1, "next": null, "prev": null},
        "results": [
            {
                "id": 1,
                "name": "Rick Sanchez",
                "status": "Alive",
                "species": "Human",
                "type": "",
                "gender": "Male",
                "origin": {"name": "Earth (C-137)", "url": ""},
                "location": {"name": "Citadel of Ricks", "url": ""},
                "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg"
            },
            {
                "id": 2,
                "name": "Morty Smith",
                "status": "Alive",
                "species": "Human",
                "type": "",
                "gender": "Male",
                "origin": {"name": "unknown", "url": ""},
                "location": {"name": "Citadel of Ricks", "url": ""},
                "image": "https://rickandmortyapi.com/api/character/avatar/2.jpeg"
            }
        ]
    })
}

/// Handler that rejects query strings and counts hits.
async fn list_characters(
    State(hits): State<Arc<AtomicUsize>>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    if query.is_some() {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "unexpected query"})));
    }
    (StatusCode::OK, Json(two_characters()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_decodes_first_page() {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route("/api/character", get(list_characters))
        .with_state(hits.clone());
    let api = CharacterApi::new(format!("{}/", serve(router).await));

    let page = api.fetch_characters().await.unwrap();

    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].name, "Rick Sanchez");
    assert_eq!(page.results[1].origin.name, "unknown");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn every_call_reissues_the_request() {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route("/api/character", get(list_characters))
        .with_state(hits.clone());
    let api = CharacterApi::new(serve(router).await);

    api.fetch_characters().await.unwrap();
    api.fetch_characters().await.unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn empty_results_is_success() {
    let router = Router::new().route(
        "/api/character",
        get(|| async { Json(json!({"info": {"count": 0}, "results": []})) }),
    );
    let api = CharacterApi::new(serve(router).await);

    let page = api.fetch_characters().await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn non_success_status_is_api_error() {
    let router = Router::new().route(
        "/api/character",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let api = CharacterApi::new(serve(router).await);

    let err = api.fetch_characters().await.unwrap_err();
    assert_matches!(err, RemoteError::ApiError { status: 500, ref body } if body == "boom");
}

#[tokio::test]
async fn missing_route_is_api_error() {
    let api = CharacterApi::new(serve(Router::new()).await);

    let err = api.fetch_characters().await.unwrap_err();
    assert_matches!(err, RemoteError::ApiError { status: 404, .. });
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let router = Router::new().route("/api/character", get(|| async { "not json" }));
    let api = CharacterApi::new(serve(router).await);

    let err = api.fetch_characters().await.unwrap_err();
    assert_matches!(err, RemoteError::Decode(_));
}

#[tokio::test]
async fn slow_server_times_out() {
    let router = Router::new().route(
        "/api/character",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(two_characters())
        }),
    );
    let api = CharacterApi::with_timeout(serve(router).await, Duration::from_millis(100)).unwrap();

    let err = api.fetch_characters().await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err}");
}

#[tokio::test]
async fn unreachable_host_is_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let api = CharacterApi::new(format!("http://{addr}"));

    let err = api.fetch_characters().await.unwrap_err();
    assert_matches!(err, RemoteError::Request(_));
}
