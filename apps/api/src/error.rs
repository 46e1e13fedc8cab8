//! # API エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換を行う。
//!
//! ## 設計方針
//!
//! - **RFC 9457 準拠**: 本文は [`ErrorResponse`]（Problem Details）
//! - **thiserror**: 型安全なエラー定義
//! - **IntoResponse 実装**: ハンドラは `Result<_, ApiError>` を返すだけでよい
//!
//! ## マッピング
//!
//! | ApiError | HTTP Status | detail |
//! |----------|-------------|--------|
//! | NotReady | 503 | 協調者が返した理由 |
//! | NotFound | 404 | 要求されたパス |
//! | HealthService | 500 | 固定値 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use beacon_shared::ErrorResponse;
use thiserror::Error;

use crate::usecase::HealthServiceError;

/// API 層で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// トラフィックを受け付けられない（503 Service Unavailable）
    #[error("準備ができていません: {0}")]
    NotReady(String),

    /// ルートが存在しない（404 Not Found）
    #[error("ルートが見つかりません: {0}")]
    NotFound(String),

    /// 協調者の失敗（500 Internal Server Error）
    ///
    /// 内部エラーの詳細はクライアントに返さず、ログにのみ出力する。
    #[error("ヘルスチェック協調者のエラー: {0}")]
    HealthService(#[from] HealthServiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotReady(reason) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::service_unavailable(reason),
            ),
            ApiError::NotFound(path) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::not_found(format!("no route for {path}")),
            ),
            ApiError::HealthService(e) => {
                tracing::error!(
                    error.category = "collaborator",
                    error.message = %e,
                    "ヘルスチェック協調者でエラーが発生しました"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error(),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    async fn into_parts(error: ApiError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_readyは503と理由を返す() {
        let (status, body) = into_parts(ApiError::NotReady("db unreachable".to_string())).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, ErrorResponse::service_unavailable("db unreachable"));
    }

    #[tokio::test]
    async fn test_not_foundは404とパスを返す() {
        let (status, body) = into_parts(ApiError::NotFound("/nope".to_string())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.detail, "no route for /nope");
    }

    #[tokio::test]
    async fn test_協調者エラーは詳細を隠して500を返す() {
        let error = ApiError::from(HealthServiceError::CheckFailed("secret dsn".to_string()));

        let (status, body) = into_parts(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, ErrorResponse::internal_error());
        assert!(!body.detail.contains("secret"));
    }
}
