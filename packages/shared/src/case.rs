//! # フィールド名の命名規則変換
//!
//! 内部モデル（snake_case）とワイヤー形式（lowerCamelCase）の間で
//! フィールド名を対応付ける。
//!
//! ## 設計方針
//!
//! - 変換規則は 1 つの純粋関数 [`to_camel_case`] に集約し、モデルごとに
//!   フィールド名をハードコードしない
//! - 入力側は [`resolve_field`] で内部名・camelCase 名のどちらも受け付ける
//! - serde の `rename_all` には頼らず、シリアライズ境界の codec ステップとして
//!   明示的に呼び出す（内部の命名変更がワイヤー互換性に波及しないようにする）

/// snake_case の識別子を lowerCamelCase に変換する
///
/// `_` で分割し、先頭セグメントはそのまま、2 番目以降のセグメントは
/// 先頭文字のみ大文字にして連結する。空のセグメント（連続・末尾の `_`）は
/// 何も寄与しない。
///
/// `_` を含まない入力はそのまま返るため、camelCase の入力に対して冪等。
///
/// ## 使用例
///
/// ```
/// use beacon_shared::case::to_camel_case;
///
/// assert_eq!(to_camel_case("next_cursor"), "nextCursor");
/// assert_eq!(to_camel_case("total"), "total");
/// assert_eq!(to_camel_case("a_b_c"), "aBC");
/// ```
pub fn to_camel_case(ident: &str) -> String {
    camel_chars(ident).collect()
}

/// [`to_camel_case`] の結果を 1 文字ずつ返す
fn camel_chars(ident: &str) -> impl Iterator<Item = char> + '_ {
    let (head, rest) = ident.split_once('_').unwrap_or((ident, ""));

    head.chars().chain(rest.split('_').flat_map(|segment| {
        let mut chars = segment.chars();
        let first = chars.next();
        first.into_iter().flat_map(char::to_uppercase).chain(chars)
    }))
}

/// 入力キーに対応する内部フィールドの位置を返す
///
/// `fields` は内部フィールド名（snake_case）の一覧。キーが内部名そのもの、
/// またはその camelCase 形と一致すればそのインデックスを返す。
/// どちらにも一致しない場合は `None`（未知のキー）。
///
/// camelCase 形は文字単位で比較し、フィールドごとに文字列を確保しない。
pub fn resolve_field(fields: &[&str], key: &str) -> Option<usize> {
    fields
        .iter()
        .position(|field| *field == key || camel_chars(field).eq(key.chars()))
}
