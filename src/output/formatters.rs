//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use std::borrow::Cow;
use std::io::Write;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::error::Result;
use crate::reference::column_name;
use crate::types::{Row, Table};

/// CSV形式のフォーマッター
pub(crate) struct CsvFormatter;

impl CsvFormatter {
    pub fn render<W: Write>(&self, table: &Table, writer: &mut W) -> Result<()> {
        for row in table {
            let mut first = true;
            for cell in row.iter() {
                if !first {
                    write!(writer, ",")?;
                }
                first = false;

                if let Some(value) = cell {
                    write!(writer, "{}", escape_csv(value))?;
                }
            }
            writeln!(writer)?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// JSON形式のフォーマッター
pub(crate) struct JsonFormatter;

#[derive(Serialize)]
struct JsonTable<'a> {
    columns: Vec<String>,
    rows: &'a [Row],
}

impl JsonFormatter {
    pub fn render<W: Write>(&self, table: &Table, columns: usize, writer: &mut W) -> Result<()> {
        let document = JsonTable {
            columns: (0..columns).map(column_name).collect(),
            rows: table,
        };

        serde_json::to_writer_pretty(&mut *writer, &document).map_err(std::io::Error::from)?;
        writeln!(writer)?;
        writer.flush()?;

        Ok(())
    }
}

/// Markdown形式のフォーマッター
///
/// 列名（A, B, C, ...）をヘッダー行とし、表示幅で列を揃えます。
pub(crate) struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn render<W: Write>(&self, table: &Table, columns: usize, writer: &mut W) -> Result<()> {
        if columns == 0 {
            return Ok(());
        }

        let header: Vec<Cow<'_, str>> = (0..columns).map(|i| Cow::Owned(column_name(i))).collect();
        let body: Vec<Vec<Cow<'_, str>>> = table
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| escape_markdown(cell.unwrap_or("").trim()))
                    .collect()
            })
            .collect();

        // 最小幅は3文字（区切り行の最小幅）
        let mut widths = vec![3; columns];
        for line in std::iter::once(&header).chain(body.iter()) {
            for (width, text) in widths.iter_mut().zip(line) {
                *width = (*width).max(text.width());
            }
        }

        write_markdown_line(writer, &header, &widths)?;
        write!(writer, "|")?;
        for width in &widths {
            write!(writer, "{}|", "-".repeat(width + 2))?;
        }
        writeln!(writer)?;
        for line in &body {
            write_markdown_line(writer, line, &widths)?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn write_markdown_line<W: Write>(
    writer: &mut W,
    cells: &[Cow<'_, str>],
    widths: &[usize],
) -> Result<()> {
    write!(writer, "|")?;
    for (text, &width) in cells.iter().zip(widths) {
        // 表示幅に基づいて左揃え（全角文字は2、半角文字は1）
        let padding = width.saturating_sub(text.width());
        write!(writer, " {}{} |", text, " ".repeat(padding))?;
    }
    writeln!(writer)?;
    Ok(())
}

/// CSV文字列をエスケープ
///
/// ダブルクォート、改行、カンマを含む場合はダブルクォートで囲み、
/// 内部のダブルクォートは2つにエスケープします。
fn escape_csv(s: &str) -> Cow<'_, str> {
    if s.contains(|c: char| c == ',' || c == '"' || c == '\n' || c == '\r') {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(s)
    }
}

/// Markdownテーブルのセル内容をエスケープ
///
/// `|`は`\|`に、改行は`<br>`に置き換えます。
fn escape_markdown(s: &str) -> Cow<'_, str> {
    if s.contains(|c: char| c == '|' || c == '\n' || c == '\r') {
        Cow::Owned(
            s.replace('|', "\\|")
                .replace("\r\n", "<br>")
                .replace(|c: char| c == '\r' || c == '\n', "<br>"),
        )
    } else {
        Cow::Borrowed(s)
    }
}
