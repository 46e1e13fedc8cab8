//! # ヘルスチェック共通型
//!
//! Liveness / Readiness プローブのエンドポイントで使用されるレスポンス型を提供する。

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// `reason` が未設定または空文字のときに使う既定の理由
pub const DEFAULT_NOT_READY_REASON: &str = "not ready";

/// ヘルスチェックレスポンス
///
/// Liveness プローブの既定ペイロード。
///
/// ## 使用例
///
/// ```
/// use beacon_shared::HealthResponse;
///
/// let response = HealthResponse::healthy("0.1.0");
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"` 固定）
    pub status:  String,
    /// アプリケーションバージョン
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            status:  "healthy".to_string(),
            version: version.into(),
        }
    }
}

/// Readiness レポート
///
/// ヘルスチェックの協調者が生成し、`/readyz` ハンドラが消費する。
/// `ready` と `reason` 以外の任意のフィールドは `extra` に保持され、
/// そのまま呼び出し元に返される（開いたレコード型）。
///
/// - `ready` が欠けている、または `null` の場合は `false` として扱う
/// - `ready` に真偽値以外（`0` や `""` など）が来た場合はデシリアライズエラー
/// - `reason` は `ready == false` のときのみ参照される
/// - デシリアライズしたレポートは、キーの有無や `null` も含めてそのまま再シリアライズされる
///
/// ## 使用例
///
/// ```
/// use beacon_shared::ReadinessReport;
///
/// let report = ReadinessReport::not_ready("db unreachable");
/// assert!(!report.ready);
/// assert_eq!(report.failure_reason(), "db unreachable");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReadinessReport {
    /// トラフィックを受け付けてよいか
    #[serde(default, deserialize_with = "null_as_false")]
    pub ready:  bool,
    /// 受け付けられない理由
    ///
    /// 外側の `Option` はキーの有無、内側は値が `null` かどうかを表す。
    /// `"reason": null` を受け取ったレポートは `Some(None)` となり、
    /// シリアライズ時にも `null` のまま出力される。
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub reason: Option<Option<String>>,
    /// 協調者が付加した任意のフィールド
    #[serde(flatten)]
    pub extra:  Map<String, Value>,
}

impl ReadinessReport {
    /// トラフィックを受け付けられるレポートを作成する
    pub fn ready() -> Self {
        Self {
            ready: true,
            ..Self::default()
        }
    }

    /// トラフィックを受け付けられないレポートを作成する
    pub fn not_ready(reason: impl Into<String>) -> Self {
        Self {
            ready: false,
            reason: Some(Some(reason.into())),
            ..Self::default()
        }
    }

    /// 任意のフィールドを追加する
    ///
    /// `ready` / `reason` と同名のキーは JSON 上で重複するため指定しないこと。
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// 503 応答に載せる理由を返す
    ///
    /// `reason` が未設定・`null`・空文字の場合は [`DEFAULT_NOT_READY_REASON`]。
    pub fn failure_reason(&self) -> &str {
        match self.reason.as_ref().and_then(Option::as_deref) {
            Some(reason) if !reason.is_empty() => reason,
            _ => DEFAULT_NOT_READY_REASON,
        }
    }
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// キーが存在すれば `Some` で包む（`null` は `Some(None)`）
fn present_or_null<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Option<String>>, D::Error> {
    Ok(Some(Option::<String>::deserialize(deserializer)?))
}
