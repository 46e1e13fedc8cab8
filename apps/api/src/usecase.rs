//! # ユースケース層
//!
//! ハンドラが依存するヘルスチェックの協調者を定義する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: ハンドラは [`HealthService`] トレイトにのみ依存する
//! - **依存性注入**: 具体的な実装は起動時に `Arc<dyn HealthService>` として注入する
//! - **薄いハンドラ**: 何を「準備完了」とみなすかは協調者の責務

pub mod health;
pub mod lifecycle;

pub use health::{HealthService, HealthServiceError};
pub use lifecycle::{LifecycleHealthService, LifecyclePhase, ReadinessGate};
