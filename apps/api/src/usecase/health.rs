//! # ヘルスチェック協調者
//!
//! `/healthz` と `/readyz` が呼び出す協調者の契約。

use async_trait::async_trait;
use beacon_shared::ReadinessReport;
use serde_json::Value;
use thiserror::Error;

/// 協調者で発生するエラー
///
/// ハンドラでは握りつぶさず、そのまま 500 に変換される。
#[derive(Debug, Error)]
pub enum HealthServiceError {
    /// チェック処理そのものが失敗した
    #[error("ヘルスチェックに失敗しました: {0}")]
    CheckFailed(String),

    /// ペイロードを JSON に変換できなかった
    #[error("ペイロードのシリアライズに失敗しました: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// ヘルスチェック協調者トレイト
///
/// 依存サービスの集約やサーキットブレーカーなど、実際の判定ロジックは
/// 実装側が持つ。ハンドラは結果を HTTP ステータスに変換するだけ。
#[async_trait]
pub trait HealthService: Send + Sync {
    /// Liveness ペイロードを返す
    ///
    /// 任意の JSON 値。安価で副作用がないことを前提とする。
    /// ハンドラは内容を検査せずにそのまま返す。
    async fn liveness(&self) -> Result<Value, HealthServiceError>;

    /// Readiness レポートを返す
    ///
    /// 内部で任意のコストのチェックを行ってよい。
    async fn readiness_report(&self) -> Result<ReadinessReport, HealthServiceError>;
}
