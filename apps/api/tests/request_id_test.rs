//! # Request ID の統合テスト
//!
//! `build_app` のレイヤー構成で `x-request-id` が正しく扱われることを検証する。
//!
//! - クライアント提供の `x-request-id` がそのまま返される
//! - 未指定なら UUID v7 を採番して返す
//! - エラーレスポンス（503 / 404）にも付与される

use std::sync::Arc;

use axum::{Router, body::Body};
use beacon_api::{
    app_builder::build_app,
    usecase::{LifecycleHealthService, ReadinessGate},
};
use http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tower::ServiceExt;

fn test_app(ready: bool) -> Router {
    let gate = ReadinessGate::new();
    if ready {
        gate.mark_ready();
    }
    build_app(Arc::new(LifecycleHealthService::new(gate, "0.0.0-test")))
}

async fn request_id_of(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("レスポンスに x-request-id ヘッダーが含まれること")
        .to_str()
        .unwrap()
        .to_string();
    (response.status(), request_id)
}

#[rstest]
#[case::healthz("/healthz", true, StatusCode::OK)]
#[case::readyz("/readyz", true, StatusCode::OK)]
#[case::readyz_not_ready("/readyz", false, StatusCode::SERVICE_UNAVAILABLE)]
#[case::未定義のパス("/missing", true, StatusCode::NOT_FOUND)]
#[tokio::test]
async fn test_クライアント提供のx_request_idがそのまま返される(
    #[case] path: &str,
    #[case] ready: bool,
    #[case] expected_status: StatusCode,
) {
    let custom_id = "client-provided-request-id-123";
    let request = Request::builder()
        .uri(path)
        .header("x-request-id", custom_id)
        .body(Body::empty())
        .unwrap();

    let (status, request_id) = request_id_of(test_app(ready), request).await;

    assert_eq!(status, expected_status);
    assert_eq!(request_id, custom_id);
}

#[tokio::test]
async fn test_自動生成のx_request_idはuuid_v7形式() {
    let request = Request::builder()
        .uri("/healthz")
        .body(Body::empty())
        .unwrap();

    let (status, request_id) = request_id_of(test_app(true), request).await;

    assert_eq!(status, StatusCode::OK);
    let parsed = uuid::Uuid::parse_str(&request_id)
        .expect("x-request-id が UUID としてパースできること");
    assert_eq!(parsed.get_version(), Some(uuid::Version::SortRand));
}

#[tokio::test]
async fn test_リクエストごとに異なるx_request_idが採番される() {
    let app = test_app(true);
    let build = || {
        Request::builder()
            .uri("/healthz")
            .body(Body::empty())
            .unwrap()
    };

    let (_, first) = request_id_of(app.clone(), build()).await;
    let (_, second) = request_id_of(app, build()).await;

    assert_ne!(first, second);
}
