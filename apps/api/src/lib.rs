//! # Beacon API サーバー
//!
//! Liveness / Readiness プローブを公開する HTTP サーバーのライブラリ部分。
//! 統合テストからルーターを組み立てられるよう、バイナリとは分けて公開する。
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - ルーターとミドルウェアの構築
//! - [`config`] - 環境変数からの設定読み込み
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`usecase`] - ヘルスチェック協調者（トレイトとライフサイクル実装）

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
