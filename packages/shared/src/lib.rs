//! # Beacon 共有ユーティリティ
//!
//! ワイヤー形式の型と、サービス横断で使うユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（HTTP レスポンスへの変換はアプリ側の責務）
//! - tower / tracing-subscriber に依存する部分は `observability` feature に閉じ込める

#[cfg(feature = "observability")]
pub mod access_log;
pub mod case;
pub mod error_response;
pub mod health;
pub mod observability;
pub mod paginated_response;

pub use error_response::ErrorResponse;
pub use health::{DEFAULT_NOT_READY_REASON, HealthResponse, ReadinessReport};
pub use paginated_response::PaginatedResponse;
