//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、判定ロジックは usecase 層の協調者に委譲
//!
//! ## モジュール構成
//!
//! ```text
//! handler.rs          # 親モジュール（re-export）
//! └── handler/
//!     ├── fallback.rs # 404 フォールバック
//!     └── health.rs   # Liveness / Readiness
//! ```

pub mod fallback;
pub mod health;

pub use fallback::not_found;
pub use health::{HealthState, health_check, readiness_check};
