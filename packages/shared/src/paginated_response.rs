//! # ページネーション付きレスポンス
//!
//! カーソルベースのページネーションに対応したリスト API のレスポンス型。
//!
//! ## JSON 形式
//!
//! ```json
//! {
//!   "items": [...],
//!   "nextCursor": "opaque-cursor-string",
//!   "total": 42
//! }
//! ```
//!
//! - `nextCursor` が `null` の場合は最後のページを意味する
//! - `total` は全件数が安価に求まる場合のみ設定する（`null` 可）
//!
//! フィールド名の変換は [`crate::case`] の codec ステップで行う。
//! 出力は常に camelCase、入力は camelCase と内部名（snake_case）の両方を受け付ける。

use std::{fmt, marker::PhantomData};

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
    de::{self, IgnoredAny, MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::case::{resolve_field, to_camel_case};

/// 内部フィールド名（宣言順）
const FIELDS: &[&str] = &["items", "next_cursor", "total"];

const ITEMS: usize = 0;
const NEXT_CURSOR: usize = 1;
const TOTAL: usize = 2;

/// ページネーション付きレスポンス
///
/// ## 使用例
///
/// ```
/// use beacon_shared::PaginatedResponse;
///
/// let page = PaginatedResponse::new(vec![1, 2], Some("tok".to_string()), None);
/// let json = serde_json::to_value(&page).unwrap();
///
/// assert_eq!(json["nextCursor"], "tok");
/// assert!(page.has_next_page());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedResponse<T> {
    /// ページの内容（順序を保持する）
    pub items:       Vec<T>,
    /// 次ページ取得用の不透明なカーソル
    pub next_cursor: Option<String>,
    /// 全ページ合計の件数
    pub total:       Option<u64>,
}

impl<T> PaginatedResponse<T> {
    /// 新しい `PaginatedResponse` を作成する
    ///
    /// `items` は空でもよく、`items` が空でなくても `total` は省略できる。
    pub fn new(items: Vec<T>, next_cursor: Option<String>, total: Option<u64>) -> Self {
        Self {
            items,
            next_cursor,
            total,
        }
    }

    /// 単一ページ（カーソル・件数なし）のレスポンスを作成する
    pub fn from_items(items: Vec<T>) -> Self {
        Self::new(items, None, None)
    }

    pub fn with_next_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.next_cursor = Some(cursor.into());
        self
    }

    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    /// 後続ページが存在するか
    pub fn has_next_page(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// カーソルと件数を保ったまま要素の型を変換する
    ///
    /// ユースケース層の出力を API 向けの DTO に詰め替える際に使う。
    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            items:       self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
            total:       self.total,
        }
    }
}

impl<T> Default for PaginatedResponse<T> {
    fn default() -> Self {
        Self::from_items(Vec::new())
    }
}

impl<T: Serialize> Serialize for PaginatedResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELDS.len()))?;
        map.serialize_entry(&to_camel_case(FIELDS[ITEMS]), &self.items)?;
        map.serialize_entry(&to_camel_case(FIELDS[NEXT_CURSOR]), &self.next_cursor)?;
        map.serialize_entry(&to_camel_case(FIELDS[TOTAL]), &self.total)?;
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for PaginatedResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PaginatedResponseVisitor(PhantomData))
    }
}

struct PaginatedResponseVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for PaginatedResponseVisitor<T> {
    type Value = PaginatedResponse<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a paginated response object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut items: Option<Vec<T>> = None;
        let mut next_cursor: Option<Option<String>> = None;
        let mut total: Option<Option<u64>> = None;

        while let Some(key) = map.next_key::<String>()? {
            match resolve_field(FIELDS, &key) {
                Some(ITEMS) => {
                    if items.is_some() {
                        return Err(de::Error::duplicate_field(FIELDS[ITEMS]));
                    }
                    items = Some(map.next_value()?);
                }
                Some(NEXT_CURSOR) => {
                    if next_cursor.is_some() {
                        return Err(de::Error::duplicate_field(FIELDS[NEXT_CURSOR]));
                    }
                    next_cursor = Some(map.next_value()?);
                }
                Some(TOTAL) => {
                    if total.is_some() {
                        return Err(de::Error::duplicate_field(FIELDS[TOTAL]));
                    }
                    total = Some(map.next_value()?);
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        let items = items.ok_or_else(|| de::Error::missing_field(FIELDS[ITEMS]))?;

        Ok(PaginatedResponse {
            items,
            next_cursor: next_cursor.flatten(),
            total: total.flatten(),
        })
    }
}
