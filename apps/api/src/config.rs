//! # アプリケーション設定
//!
//! 環境変数からサーバー設定を読み込む。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `API_HOST` | No | `0.0.0.0` | バインドアドレス（IP アドレス） |
//! | `API_PORT` | No | `8080` | ポート番号 |
//! | `DRAIN_SECONDS` | No | `5` | シャットダウン前に `/readyz` が 503 を返し続ける秒数 |
//!
//! ログ関連（`LOG_FORMAT` / `RUST_LOG`）は `beacon_shared::observability` が読む。

use std::{env, net::SocketAddr, time::Duration};

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DRAIN_SECONDS: u64 = 5;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 値をパースできない
    #[error("{key} の値が不正です: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    /// host と port からソケットアドレスを組み立てられない
    #[error("バインドアドレスが不正です: {0}")]
    InvalidAddress(String),
}

/// サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host:  String,
    /// ポート番号
    pub port:  u16,
    /// ドレイン期間
    pub drain: Duration,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー検索関数から設定を読み込む
    ///
    /// プロセスの環境変数を書き換えずにテストするために分離している。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or("API_PORT", lookup("API_PORT"), DEFAULT_PORT)?;
        let drain_seconds = parse_or("DRAIN_SECONDS", lookup("DRAIN_SECONDS"), DEFAULT_DRAIN_SECONDS)?;

        Ok(Self {
            host,
            port,
            drain: Duration::from_secs(drain_seconds),
        })
    }

    /// バインドするソケットアドレス
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_未設定ならデフォルト値を使う() {
        let config = load(&[]).unwrap();

        assert_eq!(
            config,
            ApiConfig {
                host:  "0.0.0.0".to_string(),
                port:  8080,
                drain: Duration::from_secs(5),
            }
        );
    }

    #[test]
    fn test_環境変数の値で上書きできる() {
        let config = load(&[
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "13000"),
            ("DRAIN_SECONDS", "0"),
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 13000);
        assert_eq!(config.drain, Duration::ZERO);
        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:13000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_不正なポート番号はエラー() {
        let err = load(&[("API_PORT", "http")]).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { key: "API_PORT", .. }));
    }

    #[test]
    fn test_範囲外のポート番号はエラー() {
        let err = load(&[("API_PORT", "70000")]).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { key: "API_PORT", .. }));
    }

    #[test]
    fn test_負のドレイン秒数はエラー() {
        let err = load(&[("DRAIN_SECONDS", "-1")]).unwrap_err();

        assert_eq!(err.to_string(), "DRAIN_SECONDS の値が不正です: \"-1\"");
    }

    #[test]
    fn test_ホスト名として解釈できないアドレスはエラー() {
        let config = load(&[("API_HOST", "not a host")]).unwrap();

        assert!(matches!(
            config.socket_addr(),
            Err(ConfigError::InvalidAddress(_))
        ));
    }
}
