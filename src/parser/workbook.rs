//! Workbook Module
//!
//! パッケージ内のすべてのワークシートを列挙順に解析し、
//! 1つのテーブルに連結するモジュール。

use std::io::{Read, Seek};

use crate::error::Result;
use crate::parser::events::drive;
use crate::parser::package::{Package, WorksheetPart};
use crate::parser::sheet::SheetParser;
use crate::parser::SharedStringTable;
use crate::security::SecurityConfig;
use crate::types::Table;

/// ワークブックパーサー
///
/// パッケージを開いた時点で共有文字列テーブルとワークシートの一覧を
/// 読み込みます。各ワークシートのストリームは解析中だけ開かれます。
pub(crate) struct WorkbookParser<R: Read + Seek> {
    package: Package<R>,
    strings: SharedStringTable,
    sheets: Vec<WorksheetPart>,
}

impl<R: Read + Seek> WorkbookParser<R> {
    /// ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - XLSXファイルを読み込むためのリーダー（Read + Seekトレイトを実装）
    /// * `security` - セキュリティ制限
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - パッケージ・共有文字列・シート一覧の読み込みに成功した場合
    /// * `Err(XlsxRowsError)` - エラーが発生した場合
    pub fn open(reader: R, security: &SecurityConfig) -> Result<Self> {
        let mut package = Package::open(reader, security)?;
        let strings = package.shared_strings()?;
        let sheets = package.worksheets()?;
        log::debug!(
            "Workbook has {} worksheet(s): {:?}",
            sheets.len(),
            sheets.iter().map(|sheet| sheet.name.as_str()).collect::<Vec<_>>()
        );

        Ok(Self {
            package,
            strings,
            sheets,
        })
    }

    /// ワークシート名（列挙順）
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|sheet| sheet.name.clone()).collect()
    }

    /// すべてのワークシートの行を連結して返す
    ///
    /// シートごとに新しいパーサー状態を使うため、前のシートの途中の行や
    /// セル型が次のシートに持ち越されることはありません。
    /// 最初のエラーで処理を中断し、それまでの行は返しません。
    ///
    /// # 引数
    ///
    /// * `columns` - 行の幅（0の場合は空のテーブル）
    pub fn read_rows(mut self, columns: usize) -> Result<Table> {
        let mut table = Table::new();

        for sheet in &self.sheets {
            let stream = self.package.open_part(&sheet.path)?;
            let mut parser = SheetParser::new(&self.strings, columns);
            drive(stream, &mut parser)?;

            let rows = parser.into_rows();
            log::debug!("Sheet '{}' ({}): {} row(s)", sheet.name, sheet.path, rows.len());
            table.extend(rows);
        }

        Ok(table)
    }
}
