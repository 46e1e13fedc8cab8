//! # アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::sync::Arc;

use axum::{Router, routing::get};
use beacon_shared::{
    access_log::AccessLogLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{HealthState, health_check, not_found, readiness_check},
    usecase::HealthService,
};

/// 2xx の応答をアクセスログから除外するプローブのパス
pub const PROBE_PATHS: &[&str] = &["/healthz", "/readyz"];

/// ルーターを構築する
///
/// レイヤー構成（外側から）:
///
/// ```text
/// SetRequestIdLayer → TraceLayer → PropagateRequestIdLayer → AccessLogLayer → handler
/// ```
///
/// `x-request-id` はクライアント指定があればそのまま使い、なければ UUID v7 を採番する。
pub fn build_app(health_service: Arc<dyn HealthService>) -> Router {
    let health_state = Arc::new(HealthState {
        service: health_service,
    });

    Router::new()
        .route("/healthz", get(health_check))
        .route("/readyz", get(readiness_check))
        .fallback(not_found)
        .with_state(health_state)
        .layer(AccessLogLayer::new(PROBE_PATHS))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
