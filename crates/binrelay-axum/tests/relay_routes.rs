//! Router tests with a scripted upstream.
//!
//! These verify wiring, status mapping and response shapes without any
//! network I/O.

mod common;

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use binrelay_axum::bootstrap::{AxumContext, ServerConfig};
use binrelay_axum::routes::create_router;
use binrelay_core::DispatchError;
use binrelay_core::testing::FakeDispatcher;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use common::{post_json, post_raw};

fn bytes(data: &'static [u8]) -> Bytes {
    Bytes::from_static(data)
}

fn app_with(fake: &Arc<FakeDispatcher>) -> axum::Router {
    create_router(AxumContext::new(fake.clone()), &ServerConfig::default())
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let fake = Arc::new(FakeDispatcher::with_status(200, &[], bytes(b"")));

    let response = app_with(&fake)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn image_relay_returns_encoded_result() {
    let fake = Arc::new(FakeDispatcher::with_status(
        200,
        &[("Content-Type", "image/jpeg")],
        bytes(&[0, 0, 0]),
    ));

    let (status, body) = post_json(
        app_with(&fake),
        "/api/invert-image",
        &json!({"url": "https://x/invert", "payload": "AAAA"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": "AAAA", "contentType": "image/jpeg"}));
    assert_eq!(fake.call_count(), 1);
}

#[tokio::test]
async fn image_relay_missing_payload_is_bad_request() {
    let fake = Arc::new(FakeDispatcher::with_status(200, &[], bytes(b"")));

    let (status, body) = post_json(
        app_with(&fake),
        "/api/invert-image",
        &json!({"url": "https://x/invert"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Missing url or image payload."}));
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let fake = Arc::new(FakeDispatcher::with_status(200, &[], bytes(b"")));

    let (status, body) = post_raw(app_with(&fake), "/api/invert-image", "{oops").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Missing url or image payload."}));

    let (status, body) = post_raw(app_with(&fake), "/api/zip-files", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Missing url or files payload."}));

    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn zip_relay_empty_files_is_bad_request() {
    let fake = Arc::new(FakeDispatcher::with_status(200, &[], bytes(b"")));

    let (status, body) = post_json(
        app_with(&fake),
        "/api/zip-files",
        &json!({"url": "https://x/zip", "files": []}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Missing url or files payload."}));
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn zip_relay_upstream_failure_is_bad_gateway() {
    let fake = Arc::new(FakeDispatcher::with_status(503, &[], bytes(b"")));

    let (status, body) = post_json(
        app_with(&fake),
        "/api/zip-files",
        &json!({"url": "https://x/zip", "files": [{"filename": "a.txt", "content": "SGVsbG8="}]}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"message": "Upstream request failed with 503."}));
}

#[tokio::test]
async fn image_relay_upstream_status_is_passed_through() {
    for upstream_status in [301u16, 400, 404, 429, 500] {
        let fake = Arc::new(FakeDispatcher::with_status(upstream_status, &[], bytes(b"")));

        let (status, body) = post_json(
            app_with(&fake),
            "/api/invert-image",
            &json!({"url": "https://x/invert", "payload": "AAAA"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let message = body["message"].as_str().unwrap();
        assert!(message.contains(&upstream_status.to_string()), "{message}");
    }
}

#[tokio::test]
async fn dispatch_errors_are_internal_with_generic_message() {
    let fake = Arc::new(FakeDispatcher::failing(DispatchError::Connect(
        "tcp connect error: Connection refused (os error 111)".to_string(),
    )));

    let (status, body) = post_json(
        app_with(&fake),
        "/api/invert-image",
        &json!({"url": "https://x/invert", "payload": "AAAA"}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Could not reach the image API."}));

    let (status, body) = post_json(
        app_with(&fake),
        "/api/zip-files",
        &json!({"url": "https://x/zip", "files": [{"filename": "a.txt", "content": "SGVsbG8="}]}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Could not reach the zip API."}));
}

#[tokio::test]
async fn zip_relay_returns_archive_and_filename() {
    let fake = Arc::new(FakeDispatcher::with_status(
        200,
        &[("Content-Disposition", r#"attachment; filename="custom.zip""#)],
        bytes(b"PK"),
    ));

    let (status, body) = post_json(
        app_with(&fake),
        "/api/zip-files",
        &json!({"url": "https://x/zip", "files": [
            {"filename": "a.txt", "content": "SGVsbG8=", "size": 5}
        ]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"zip": "UEs=", "filename": "custom.zip"}));
}

#[tokio::test]
async fn oversized_body_is_rejected_before_relay() {
    let fake = Arc::new(FakeDispatcher::with_status(200, &[], bytes(b"")));
    let app = create_router(
        AxumContext::new(fake.clone()),
        &ServerConfig::default().with_body_limit(16),
    );

    let (status, _) = post_json(
        app,
        "/api/invert-image",
        &json!({"url": "https://x/invert", "payload": "AAAAAAAAAAAAAAAA"}),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn relay_routes_reject_get() {
    let fake = Arc::new(FakeDispatcher::with_status(200, &[], bytes(b"")));

    let response = app_with(&fake)
        .oneshot(
            Request::builder()
                .uri("/api/invert-image")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
