//! # ヘルスチェックハンドラ
//!
//! - `GET /healthz`: Liveness Check（協調者のペイロードをそのまま 200 で返す）
//! - `GET /readyz`: Readiness Check（`ready` を 200 / 503 に変換する）
//!
//! ## 用途
//!
//! - **ロードバランサー**: ターゲットグループのヘルスチェック
//! - **コンテナオーケストレーター**: Kubernetes の liveness/readiness probe
//!
//! ## レスポンス例
//!
//! ```text
//! $ curl -i http://localhost:8080/readyz
//! HTTP/1.1 503 Service Unavailable
//! {"type":"https://beacon.example.com/errors/service-unavailable",
//!  "title":"Service Unavailable","status":503,"detail":"db unreachable"}
//! ```
//!
//! どちらのハンドラもリトライ・タイムアウトを持たない。協調者のエラーは
//! [`ApiError`] 経由で 500 になる。

use std::sync::Arc;

use axum::{Json, extract::State};
use beacon_shared::ReadinessReport;
use serde_json::Value;

use crate::{error::ApiError, usecase::HealthService};

/// ヘルスチェックハンドラの共有状態
pub struct HealthState {
    pub service: Arc<dyn HealthService>,
}

/// Liveness Check エンドポイント
///
/// ペイロードの中身は検査しない。
///
/// ## レスポンス
///
/// | Status | Body |
/// |--------|------|
/// | 200 | 協調者の Liveness ペイロード（任意の JSON） |
/// | 500 | [`ErrorResponse`](beacon_shared::ErrorResponse)（`internal-error`） |
pub async fn health_check(State(state): State<Arc<HealthState>>) -> Result<Json<Value>, ApiError> {
    let payload = state.service.liveness().await?;
    Ok(Json(payload))
}

/// Readiness Check エンドポイント
///
/// `ready == false` のときは 503。`reason` が未設定または空文字なら
/// `"not ready"` を detail に載せる。`ready == true` のときはレポート全体を
/// 追加フィールドも含めてそのまま返す。
///
/// ## レスポンス
///
/// | Status | Body |
/// |--------|------|
/// | 200 | [`ReadinessReport`]（キーの有無や `null` も含めて協調者の出力のまま） |
/// | 503 | [`ErrorResponse`](beacon_shared::ErrorResponse)（`service-unavailable`、`detail` に理由） |
/// | 500 | [`ErrorResponse`](beacon_shared::ErrorResponse)（`internal-error`） |
#[tracing::instrument(skip_all)]
pub async fn readiness_check(
    State(state): State<Arc<HealthState>>,
) -> Result<Json<ReadinessReport>, ApiError> {
    let report = state.service.readiness_report().await?;

    if !report.ready {
        let reason = report.failure_reason().to_string();
        tracing::debug!(reason = %reason, "readiness check: not ready");
        return Err(ApiError::NotReady(reason));
    }

    Ok(Json(report))
}
