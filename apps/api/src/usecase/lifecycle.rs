//! # ライフサイクル連動のヘルスチェック
//!
//! プロセスの起動・停止フェーズに連動して Readiness を切り替える協調者。
//!
//! ```text
//! Starting ──mark_ready──▶ Ready ──begin_drain──▶ Draining
//!    └──────────────begin_drain───────────────────▲
//! ```
//!
//! - `Starting`: サーバー起動処理中。`/readyz` は 503（`starting up`）
//! - `Ready`: トラフィック受け付け可能。`/readyz` は 200
//! - `Draining`: シャットダウン待機中。`/readyz` は 503（`shutting down`）
//!
//! `Draining` は終端状態で、`mark_ready` を呼んでも戻らない。
//! 依存サービス（DB 等）の疎通確認は行わない。

use std::sync::{
    Arc,
    atomic::{AtomicU8, Ordering},
};

use async_trait::async_trait;
use beacon_shared::{HealthResponse, ReadinessReport};
use serde_json::Value;

use super::health::{HealthService, HealthServiceError};

/// ライフサイクルフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LifecyclePhase {
    Starting = 0,
    Ready = 1,
    Draining = 2,
}

impl LifecyclePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Ready => "ready",
            Self::Draining => "draining",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Starting,
            1 => Self::Ready,
            _ => Self::Draining,
        }
    }
}

/// フェーズを共有するハンドル
///
/// `Clone` は同じフェーズを指す。`main` とヘルスチェック協調者で共有する。
#[derive(Debug, Clone, Default)]
pub struct ReadinessGate {
    phase: Arc<AtomicU8>,
}

impl ReadinessGate {
    /// `Starting` フェーズのゲートを作成する
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LifecyclePhase {
        LifecyclePhase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    /// `Starting` → `Ready` に遷移する
    ///
    /// 遷移した場合は `true`。既に `Ready` / `Draining` なら何もせず `false`。
    pub fn mark_ready(&self) -> bool {
        let transitioned = self
            .phase
            .compare_exchange(
                LifecyclePhase::Starting as u8,
                LifecyclePhase::Ready as u8,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok();

        if transitioned {
            tracing::info!(phase = "ready", "トラフィックの受け付けを開始します");
        }
        transitioned
    }

    /// `Draining` に遷移する
    ///
    /// 遷移した場合は `true`。既に `Draining` なら `false`。
    pub fn begin_drain(&self) -> bool {
        let previous =
            LifecyclePhase::from_u8(self.phase.swap(LifecyclePhase::Draining as u8, Ordering::SeqCst));

        if previous == LifecyclePhase::Draining {
            return false;
        }
        tracing::info!(
            phase = "draining",
            previous = previous.as_str(),
            "シャットダウンに向けてトラフィックの受け付けを停止します"
        );
        true
    }
}

/// ライフサイクル連動のヘルスチェック協調者
pub struct LifecycleHealthService {
    gate:    ReadinessGate,
    version: String,
}

impl LifecycleHealthService {
    pub fn new(gate: ReadinessGate, version: impl Into<String>) -> Self {
        Self {
            gate,
            version: version.into(),
        }
    }
}

#[async_trait]
impl HealthService for LifecycleHealthService {
    async fn liveness(&self) -> Result<Value, HealthServiceError> {
        Ok(serde_json::to_value(HealthResponse::healthy(&self.version))?)
    }

    async fn readiness_report(&self) -> Result<ReadinessReport, HealthServiceError> {
        let phase = self.gate.phase();
        let report = match phase {
            LifecyclePhase::Ready => ReadinessReport::ready(),
            LifecyclePhase::Starting => ReadinessReport::not_ready("starting up"),
            LifecyclePhase::Draining => ReadinessReport::not_ready("shutting down"),
        };
        Ok(report.with_field("phase", phase.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_新しいゲートはstartingフェーズ() {
        assert_eq!(ReadinessGate::new().phase(), LifecyclePhase::Starting);
    }

    #[test]
    fn test_mark_readyでreadyに遷移する() {
        let gate = ReadinessGate::new();

        assert!(gate.mark_ready());
        assert_eq!(gate.phase(), LifecyclePhase::Ready);
        assert!(!gate.mark_ready(), "二度目は遷移しないこと");
    }

    #[test]
    fn test_drainingはmark_readyで戻らない() {
        let gate = ReadinessGate::new();
        gate.mark_ready();

        assert!(gate.begin_drain());
        assert!(!gate.mark_ready());
        assert_eq!(gate.phase(), LifecyclePhase::Draining);
    }

    #[test]
    fn test_startingから直接drainingに遷移できる() {
        let gate = ReadinessGate::new();

        assert!(gate.begin_drain());
        assert!(!gate.begin_drain(), "二度目は遷移しないこと");
        assert_eq!(gate.phase(), LifecyclePhase::Draining);
    }

    #[test]
    fn test_cloneしたゲートは同じフェーズを共有する() {
        let gate = ReadinessGate::new();
        let shared = gate.clone();

        shared.mark_ready();

        assert_eq!(gate.phase(), LifecyclePhase::Ready);
    }

    #[tokio::test]
    async fn test_livenessはバージョン付きのhealthyを返す() {
        let sut = LifecycleHealthService::new(ReadinessGate::new(), "1.2.3");

        let payload = sut.liveness().await.unwrap();

        assert_eq!(payload, json!({ "status": "healthy", "version": "1.2.3" }));
    }

    #[tokio::test]
    async fn test_フェーズごとのreadinessレポート() {
        let gate = ReadinessGate::new();
        let sut = LifecycleHealthService::new(gate.clone(), "0.1.0");

        let starting = serde_json::to_value(sut.readiness_report().await.unwrap()).unwrap();
        assert_eq!(
            starting,
            json!({ "ready": false, "reason": "starting up", "phase": "starting" })
        );

        gate.mark_ready();
        let ready = serde_json::to_value(sut.readiness_report().await.unwrap()).unwrap();
        assert_eq!(ready, json!({ "ready": true, "phase": "ready" }));

        gate.begin_drain();
        let draining = serde_json::to_value(sut.readiness_report().await.unwrap()).unwrap();
        assert_eq!(
            draining,
            json!({ "ready": false, "reason": "shutting down", "phase": "draining" })
        );
    }
}
