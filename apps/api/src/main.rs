//! # Beacon API サーバー
//!
//! Liveness / Readiness プローブを公開する HTTP サーバー。
//!
//! ## エンドポイント
//!
//! | Method | Path | 成功 | 失敗 |
//! |--------|------|------|------|
//! | GET | `/healthz` | 200（Liveness ペイロード） | 500 |
//! | GET | `/readyz` | 200（Readiness レポート） | 503（理由または `"not ready"`） |
//!
//! ## ライフサイクル
//!
//! 1. 起動直後は `Starting`（`/readyz` は 503）
//! 2. リスナーのバインド後に `Ready`
//! 3. SIGINT / SIGTERM 受信で `Draining` に入り、`DRAIN_SECONDS` の間は
//!    リクエストを受け付けつつ `/readyz` で 503 を返す
//! 4. ドレイン期間の経過後、処理中のリクエストを待って停止する
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p beacon-api
//!
//! # 本番環境
//! API_PORT=8080 LOG_FORMAT=json cargo run -p beacon-api --release
//! ```

use std::{sync::Arc, time::Duration};

use anyhow::Context as _;
use beacon_api::{
    app_builder::build_app,
    config::ApiConfig,
    usecase::{HealthService, LifecycleHealthService, ReadinessGate},
};
use beacon_shared::observability::{self, TracingConfig};
use tokio::net::TcpListener;

const SERVICE_NAME: &str = "beacon-api";

/// Beacon API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env(SERVICE_NAME);
    observability::init_tracing(&tracing_config).context("トレーシングの初期化に失敗しました")?;
    let _tracing_guard =
        tracing::info_span!("app", service = %tracing_config.service_name).entered();

    let config = ApiConfig::from_env().context("設定の読み込みに失敗しました")?;
    let addr = config.socket_addr()?;

    let gate = ReadinessGate::new();
    let health_service: Arc<dyn HealthService> = Arc::new(LifecycleHealthService::new(
        gate.clone(),
        env!("CARGO_PKG_VERSION"),
    ));
    let app = build_app(health_service);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("{addr} へのバインドに失敗しました"))?;
    tracing::info!("Beacon API サーバーが起動しました: {}", addr);
    gate.mark_ready();

    axum::serve(listener, app)
        .with_graceful_shutdown(drain_on_signal(gate, config.drain))
        .await
        .context("サーバーが異常終了しました")?;

    tracing::info!("Beacon API サーバーを停止しました");
    Ok(())
}

/// 停止シグナルを待ち、ドレイン期間が過ぎたら完了する
async fn drain_on_signal(gate: ReadinessGate, drain: Duration) {
    shutdown_signal().await;
    gate.begin_drain();
    tracing::info!(drain_seconds = drain.as_secs(), "ドレイン期間を開始します");
    tokio::time::sleep(drain).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "SIGINT ハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
