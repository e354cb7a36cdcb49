//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use serde::Serialize;

/// セル値のエンコーディング
///
/// `<c>`要素の`t`属性で決まります。`t`が無い、または`s`/`inlineStr`以外の場合は
/// `Number`として扱います。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum CellType {
    /// 共有文字列テーブルへのインデックス（`t="s"`）
    SharedStringIndex,
    /// 数値リテラル（デフォルト）
    #[default]
    Number,
    /// セル内に埋め込まれた文字列（`t="inlineStr"`）
    InlineString,
}

impl CellType {
    /// `t`属性の値からセル型を決定
    pub(crate) fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("s") => CellType::SharedStringIndex,
            Some("inlineStr") => CellType::InlineString,
            _ => CellType::Number,
        }
    }
}

/// 固定長の行
///
/// 位置`i`が列`i`に対応します。長さは生成時に決まり、以後変わりません。
/// 値が設定されなかった位置は`None`（空文字列とは区別されます）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Row {
    cells: Box<[Option<String>]>,
}

impl Row {
    /// 行の幅（設定された列数）
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// 幅0の行かどうか
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// 列`index`の値を取得
    ///
    /// 範囲外、または値が設定されていない場合は`None`を返します。
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).and_then(|cell| cell.as_deref())
    }

    /// すべてのセルをスライスとして取得
    pub fn cells(&self) -> &[Option<String>] {
        &self.cells
    }

    /// セルを順に走査
    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
        self.cells.iter().map(|cell| cell.as_deref())
    }

    /// `Vec`に変換
    pub fn into_vec(self) -> Vec<Option<String>> {
        self.cells.into_vec()
    }
}

impl From<Vec<Option<String>>> for Row {
    fn from(cells: Vec<Option<String>>) -> Self {
        Self {
            cells: cells.into_boxed_slice(),
        }
    }
}

impl FromIterator<Option<String>> for Row {
    fn from_iter<I: IntoIterator<Item = Option<String>>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// 1シート分の出力行（文書順）
pub type SheetTable = Vec<Row>;

/// 読み込み結果（シート列挙順に連結した行）
pub type Table = Vec<Row>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_type_from_attribute() {
        assert_eq!(CellType::from_attribute(Some("s")), CellType::SharedStringIndex);
        assert_eq!(
            CellType::from_attribute(Some("inlineStr")),
            CellType::InlineString
        );
        assert_eq!(CellType::from_attribute(None), CellType::Number);
        assert_eq!(CellType::from_attribute(Some("n")), CellType::Number);
        // 数式文字列・論理値・エラーも数値として扱う
        assert_eq!(CellType::from_attribute(Some("str")), CellType::Number);
        assert_eq!(CellType::from_attribute(Some("b")), CellType::Number);
        assert_eq!(CellType::default(), CellType::Number);
    }

    #[test]
    fn test_row_accessors() {
        let row = Row::from(vec![Some("a".to_string()), None, Some(String::new())]);

        assert_eq!(row.len(), 3);
        assert!(!row.is_empty());
        assert_eq!(row.get(0), Some("a"));
        assert_eq!(row.get(1), None);
        assert_eq!(row.get(2), Some(""));
        assert_eq!(row.get(3), None);
        assert_eq!(
            row.iter().collect::<Vec<_>>(),
            vec![Some("a"), None, Some("")]
        );
    }

    #[test]
    fn test_row_serializes_as_array() {
        let row = Row::from(vec![Some("x".to_string()), None]);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"["x",null]"#);
    }
}
