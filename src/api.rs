//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 出力フォーマット
///
/// 読み取った行テーブルを`RowReader::convert`で書き出す際の形式を指定します。
/// 存在しないセル（`None`）と空文字列のセルは、形式によって区別されない場合があります。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutputFormat {
    /// CSV形式（デフォルト）
    ///
    /// 1行につき1レコードを出力します。存在しないセルは空フィールドになり、
    /// `,` `"` 改行を含む値はダブルクォートで囲みます。
    ///
    /// # 出力例
    ///
    /// ```csv
    /// 学号,姓名,
    /// 1001,"Smith, J",42
    /// ```
    #[default]
    Csv,

    /// JSON形式
    ///
    /// 列名（A, B, C, ...）と行の配列を1つのオブジェクトとして出力します。
    /// 存在しないセルは`null`です。
    ///
    /// # 出力例
    ///
    /// ```json
    /// {
    ///   "columns": ["A", "B"],
    ///   "rows": [
    ///     ["学号", null],
    ///     ["1001", "42"]
    ///   ]
    /// }
    /// ```
    Json,

    /// Markdown形式
    ///
    /// 列名をヘッダーとしたMarkdownテーブルを出力します。
    /// 列幅は表示幅（全角文字は2）で揃えます。
    ///
    /// # 出力例
    ///
    /// ```markdown
    /// | A    | B   |
    /// | ---- | --- |
    /// | 学号 |     |
    /// | 1001 | 42  |
    /// ```
    Markdown,
}
