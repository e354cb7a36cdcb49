//! Output Format Module
//!
//! Strategy Patternによる出力フォーマットの抽象化を提供するモジュール。

mod formatters;

use std::io::Write;

use crate::api::OutputFormat;
use crate::error::Result;
use crate::types::Table;

pub(crate) use formatters::{CsvFormatter, JsonFormatter, MarkdownFormatter};

/// 出力フォーマッター（Strategy Pattern）
///
/// 各出力フォーマット（CSV, JSON, Markdown）をenumとして表現します。
#[derive(Debug, Clone, Copy)]
pub(crate) enum OutputFormatter {
    Csv,
    Json,
    Markdown,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => OutputFormatter::Csv,
            OutputFormat::Json => OutputFormatter::Json,
            OutputFormat::Markdown => OutputFormatter::Markdown,
        }
    }

    /// テーブルを指定されたフォーマットで出力する
    ///
    /// # 引数
    ///
    /// * `table` - 出力する行テーブル
    /// * `columns` - 行の幅（列名の生成に使用）
    /// * `writer` - 出力先のライター
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 出力に成功した場合
    /// * `Err(XlsxRowsError)` - 書き込みに失敗した場合
    pub fn render<W: Write>(&self, table: &Table, columns: usize, writer: &mut W) -> Result<()> {
        match self {
            OutputFormatter::Csv => CsvFormatter.render(table, writer),
            OutputFormatter::Json => JsonFormatter.render(table, columns, writer),
            OutputFormatter::Markdown => MarkdownFormatter.render(table, columns, writer),
        }
    }
}
