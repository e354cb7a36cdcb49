//! Builder Module
//!
//! Fluent Builder APIを提供し、`RowReader`インスタンスを段階的に構築する。

use std::fs::File;
use std::io::{BufWriter, Read, Seek, Write};
use std::path::Path;

use crate::api::OutputFormat;
use crate::error::{Result, XlsxRowsError};
use crate::output::OutputFormatter;
use crate::parser::WorkbookParser;
use crate::security::SecurityConfig;
use crate::types::Table;

/// 1行あたりの列数の上限（`XFD`列）
pub(crate) const MAX_COLUMNS: usize = 16_384;

/// 読み取り処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ReaderConfig {
    /// 行の幅（0の場合は常に空のテーブル）
    pub columns: usize,

    /// 出力フォーマット
    pub output_format: OutputFormat,

    /// セキュリティ制限
    pub security: SecurityConfig,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            columns: 0,
            output_format: OutputFormat::Csv,
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `RowReader`インスタンスを段階的に構築するためのビルダーです。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxrows::{OutputFormat, ReaderBuilder};
///
/// # fn main() -> Result<(), xlsxrows::XlsxRowsError> {
/// let reader = ReaderBuilder::new()
///     .with_columns(4)
///     .with_output_format(OutputFormat::Markdown)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ReaderBuilder {
    /// 内部設定（構築中）
    config: ReaderConfig,
}

impl Default for ReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 列数: 0（行を出力しない）
    /// - 出力フォーマット: CSV
    pub fn new() -> Self {
        Self {
            config: ReaderConfig::default(),
        }
    }

    /// 行の幅を指定する
    ///
    /// 各行はちょうど`columns`個のセルを持ちます。`columns`以上の列にある
    /// 値はエラーになります。0を指定した場合、内容にかかわらず空のテーブルを返します。
    ///
    /// # 引数
    ///
    /// * `columns: usize`: 行の幅
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.config.columns = columns;
        self
    }

    /// 出力フォーマットを指定する
    ///
    /// `RowReader::convert`と`RowReader::convert_to_string`で使用されます。
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxrows::{OutputFormat, ReaderBuilder};
    ///
    /// let builder = ReaderBuilder::new()
    ///     .with_output_format(OutputFormat::Json);
    /// ```
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// 設定を検証し、`RowReader`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(RowReader)`: 設定が有効な場合
    /// * `Err(XlsxRowsError::Config)`: 列数が16384（`XFD`列）を超える場合
    pub fn build(self) -> Result<RowReader> {
        if self.config.columns > MAX_COLUMNS {
            return Err(XlsxRowsError::Config(format!(
                "Column count {} exceeds the sheet limit of {}",
                self.config.columns, MAX_COLUMNS
            )));
        }

        Ok(RowReader::new(self.config))
    }
}

/// 読み取り処理のファサード
///
/// XLSXワークブックのすべてのワークシートを読み、固定長の行の
/// テーブルとして返すメインエントリーポイントです。
/// 各呼び出しは独立した状態で処理されます。
///
/// # 使用例
///
/// ```rust,no_run
/// use std::fs::File;
/// use xlsxrows::ReaderBuilder;
///
/// # fn main() -> Result<(), xlsxrows::XlsxRowsError> {
/// let reader = ReaderBuilder::new().with_columns(3).build()?;
/// let table = reader.read(File::open("students.xlsx")?)?;
/// for row in &table {
///     println!("{:?}", row.cells());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RowReader {
    config: ReaderConfig,
}

impl RowReader {
    pub(crate) fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// 設定された行の幅
    pub fn columns(&self) -> usize {
        self.config.columns
    }

    /// 設定された出力フォーマット
    pub fn output_format(&self) -> OutputFormat {
        self.config.output_format
    }

    /// ワークブックのすべてのワークシートを読み、行を連結して返す
    ///
    /// # 引数
    ///
    /// * `input` - XLSXファイルを読み込むためのリーダー（Read + Seekトレイトを実装）
    ///
    /// # 戻り値
    ///
    /// * `Ok(Table)` - ワークシートの列挙順、シート内は文書順の行
    /// * `Err(XlsxRowsError)` - 最初に発生したエラー（途中までの行は返しません）
    pub fn read<R: Read + Seek>(&self, input: R) -> Result<Table> {
        let parser = WorkbookParser::open(input, &self.config.security)?;
        let table = parser.read_rows(self.config.columns)?;
        log::debug!("Read {} row(s) of width {}", table.len(), self.config.columns);
        Ok(table)
    }

    /// ファイルパスからワークブックを読む
    ///
    /// ファイルはこの呼び出しの間だけ開かれ、エラー時も閉じられます。
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Table> {
        let path = path.as_ref();
        log::debug!("Opening {}", path.display());
        self.read(File::open(path)?)
    }

    /// ワークシート名を列挙順に返す
    pub fn sheet_names<R: Read + Seek>(&self, input: R) -> Result<Vec<String>> {
        let parser = WorkbookParser::open(input, &self.config.security)?;
        Ok(parser.sheet_names())
    }

    /// ワークブックを読み、設定された出力フォーマットで書き出す
    ///
    /// # 引数
    ///
    /// * `input` - XLSXファイルを読み込むためのリーダー（Read + Seekトレイトを実装）
    /// * `output` - 出力先のライター（Writeトレイトを実装）
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 変換に成功した場合
    /// * `Err(XlsxRowsError)` - エラーが発生した場合（出力は書き込まれません）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use std::fs::File;
    /// use xlsxrows::{OutputFormat, ReaderBuilder};
    ///
    /// # fn main() -> Result<(), xlsxrows::XlsxRowsError> {
    /// let reader = ReaderBuilder::new()
    ///     .with_columns(3)
    ///     .with_output_format(OutputFormat::Markdown)
    ///     .build()?;
    /// let input = File::open("students.xlsx")?;
    /// reader.convert(input, std::io::stdout())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert<R: Read + Seek, W: Write>(&self, input: R, output: W) -> Result<()> {
        let table = self.read(input)?;

        let formatter = OutputFormatter::from_format(self.config.output_format);
        let mut writer = BufWriter::new(output);
        formatter.render(&table, self.config.columns, &mut writer)?;
        writer.flush()?;

        Ok(())
    }

    /// ワークブックを読み、設定された出力フォーマットの文字列として返す
    pub fn convert_to_string<R: Read + Seek>(&self, input: R) -> Result<String> {
        let mut buffer = Vec::new();
        self.convert(input, &mut buffer)?;

        let result = String::from_utf8(buffer).map_err(|e| {
            XlsxRowsError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(result)
    }
}

/// ファイルパスのワークブックを読み、固定長の行のテーブルを返す
///
/// `ReaderBuilder::new().with_columns(columns).build()?.read_path(path)`の短縮形です。
///
/// # 使用例
///
/// ```rust,no_run
/// # fn main() -> Result<(), xlsxrows::XlsxRowsError> {
/// let table = xlsxrows::read_rows("students.xlsx", 3)?;
/// println!("{} rows", table.len());
/// # Ok(())
/// # }
/// ```
pub fn read_rows<P: AsRef<Path>>(path: P, columns: usize) -> Result<Table> {
    ReaderBuilder::new()
        .with_columns(columns)
        .build()?
        .read_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reader_builder_new() {
        let builder = ReaderBuilder::new();
        assert_eq!(builder.config.columns, 0);
        assert_eq!(builder.config.output_format, OutputFormat::Csv);
    }

    #[test]
    fn test_builder_method_chaining() {
        let reader = ReaderBuilder::new()
            .with_columns(12)
            .with_output_format(OutputFormat::Json)
            .build()
            .unwrap();

        assert_eq!(reader.columns(), 12);
        assert_eq!(reader.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_build_accepts_column_limit() {
        assert!(ReaderBuilder::new().with_columns(MAX_COLUMNS).build().is_ok());
    }

    #[test]
    fn test_build_rejects_too_many_columns() {
        let result = ReaderBuilder::new().with_columns(MAX_COLUMNS + 1).build();
        match result {
            Err(XlsxRowsError::Config(msg)) => assert!(msg.contains("16384")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_read_invalid_input() {
        let reader = ReaderBuilder::new().with_columns(1).build().unwrap();
        let result = reader.read(Cursor::new(Vec::<u8>::new()));
        assert!(matches!(result, Err(XlsxRowsError::Package(_))));
    }

    #[test]
    fn test_convert_to_string_with_invalid_input() {
        let reader = ReaderBuilder::new().build().unwrap();
        let result = reader.convert_to_string(Cursor::new(b"PK garbage".to_vec()));
        assert!(result.is_err());
    }

    #[test]
    fn test_read_path_missing_file() {
        let result = read_rows("/nonexistent/path/to/workbook.xlsx", 2);
        assert!(matches!(result, Err(XlsxRowsError::Io(_))));
    }
}
