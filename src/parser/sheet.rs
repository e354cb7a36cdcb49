//! Sheet Stream Parser Module
//!
//! 1つのワークシートXMLをイベント駆動で読み、固定長の行を組み立てる
//! ステートマシン。DOMは構築せず、前方向のストリームとして処理します。

use std::io::BufRead;

use quick_xml::events::BytesStart;

use crate::assembler::RowAssembler;
use crate::error::{Result, XlsxRowsError};
use crate::formatter::CellDecoder;
use crate::parser::events::{attribute, drive, MarkupHandler};
use crate::parser::SharedStringTable;
use crate::reference::column_index;
use crate::types::{CellType, SheetTable};

/// ワークシートパーサーの状態
///
/// ワークシート1つにつき1インスタンス。値の取得用バッファと行バッファは
/// このインスタンスが専有し、セル・行ごとにクリアして再利用します。
pub(crate) struct SheetParser<'a> {
    decoder: CellDecoder<'a>,
    assembler: RowAssembler,
    /// 現在のセルの型
    cell_type: CellType,
    /// 現在のセルの列インデックス（セルの外では`None`）
    column: Option<usize>,
    capturing: bool,
    capture: String,
}

impl<'a> SheetParser<'a> {
    pub fn new(strings: &'a SharedStringTable, columns: usize) -> Self {
        Self {
            decoder: CellDecoder::new(strings),
            assembler: RowAssembler::new(columns),
            cell_type: CellType::Number,
            column: None,
            capturing: false,
            capture: String::new(),
        }
    }

    /// 出力された行を取り出す
    pub fn into_rows(self) -> SheetTable {
        self.assembler.into_rows()
    }

    fn start_cell(&mut self, element: &BytesStart<'_>) -> Result<()> {
        let reference = attribute(element, b"r")?.ok_or_else(|| {
            XlsxRowsError::MalformedReference("cell element without 'r' attribute".to_string())
        })?;
        self.column = Some(column_index(&reference)?);
        self.cell_type = CellType::from_attribute(attribute(element, b"t")?.as_deref());
        Ok(())
    }

    fn finish_value(&mut self) -> Result<()> {
        self.capturing = false;
        if let Some(column) = self.column {
            let value = self.decoder.decode(self.cell_type, &self.capture)?;
            self.assembler.set_cell(column, value)?;
        }
        Ok(())
    }
}

impl MarkupHandler for SheetParser<'_> {
    fn start_element(&mut self, element: &BytesStart<'_>) -> Result<()> {
        match element.local_name().as_ref() {
            b"c" => self.start_cell(element)?,
            b"v" | b"t" if self.column.is_some() => {
                self.capture.clear();
                self.capturing = true;
            }
            _ => {}
        }
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<()> {
        if self.capturing {
            self.capture.push_str(text);
        }
        Ok(())
    }

    fn end_element(&mut self, local_name: &[u8]) -> Result<()> {
        match local_name {
            b"v" | b"t" if self.capturing => self.finish_value()?,
            b"c" => self.column = None,
            b"row" => self.assembler.end_row(),
            _ => {}
        }
        Ok(())
    }
}

/// 1つのワークシートXMLを解析して行を返す
///
/// # 引数
///
/// * `reader` - ワークシートパートのXMLストリーム
/// * `strings` - パッケージの共有文字列テーブル
/// * `columns` - 行の幅（0の場合は行を出力しない）
///
/// # 戻り値
///
/// * `Ok(SheetTable)` - 空でない行（文書順）
/// * `Err(XlsxRowsError)` - 最初に発生したエラー
///
/// # 使用例
///
/// ```rust
/// use xlsxrows::{parse_sheet, SharedStringTable};
///
/// # fn main() -> Result<(), xlsxrows::XlsxRowsError> {
/// let strings = SharedStringTable::from(vec!["name".to_string()]);
/// let xml = r#"<worksheet><sheetData>
///   <row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1"><v>41.6</v></c></row>
/// </sheetData></worksheet>"#;
///
/// let rows = parse_sheet(xml.as_bytes(), &strings, 2)?;
/// assert_eq!(rows[0].get(0), Some("name"));
/// assert_eq!(rows[0].get(1), Some("42"));
/// # Ok(())
/// # }
/// ```
pub fn parse_sheet<R: BufRead>(
    reader: R,
    strings: &SharedStringTable,
    columns: usize,
) -> Result<SheetTable> {
    let mut parser = SheetParser::new(strings, columns);
    drive(reader, &mut parser)?;
    Ok(parser.into_rows())
}
