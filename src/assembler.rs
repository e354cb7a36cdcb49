//! Row Assembler Module
//!
//! デコード済みのセル値を固定長の行バッファに蓄積し、行の終端で
//! 出力するか破棄するかを決定するモジュール。

use crate::error::{IndexKind, Result, XlsxRowsError};
use crate::types::{Row, SheetTable};

/// 行アセンブラー
///
/// 行バッファはシートごとに1回だけ確保され、行の終端ごとに中身を
/// 出力へ移してから全位置を`None`に戻して再利用します。
///
/// `columns == 0`の場合は無効化され、行は一切出力されません。
#[derive(Debug)]
pub(crate) struct RowAssembler {
    buffer: Vec<Option<String>>,
    rows: SheetTable,
}

impl RowAssembler {
    /// `columns`幅の行アセンブラーを生成
    pub fn new(columns: usize) -> Self {
        Self {
            buffer: vec![None; columns],
            rows: Vec::new(),
        }
    }

    /// 行の幅
    pub fn columns(&self) -> usize {
        self.buffer.len()
    }

    /// 列`index`に値を書き込む
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 書き込みに成功した場合（`columns == 0`では何もしない）
    /// * `Err(XlsxRowsError::IndexOutOfRange)` - `index >= columns`の場合
    pub fn set_cell(&mut self, index: usize, value: String) -> Result<()> {
        let columns = self.columns();
        if columns == 0 {
            return Ok(());
        }

        let slot = self
            .buffer
            .get_mut(index)
            .ok_or(XlsxRowsError::IndexOutOfRange {
                kind: IndexKind::Column,
                index,
                bound: columns,
            })?;
        *slot = Some(value);
        Ok(())
    }

    /// 行の終端を処理する
    ///
    /// すべての位置が`None`の行は出力せずに破棄します。
    pub fn end_row(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        if self.buffer.iter().all(Option::is_none) {
            log::trace!("Suppressing empty row");
            return;
        }

        // take()で値を移しつつバッファをNoneに戻す
        let row: Row = self.buffer.iter_mut().map(Option::take).collect();
        self.rows.push(row);
    }

    /// 出力済みの行を取り出す
    pub fn into_rows(self) -> SheetTable {
        self.rows
    }
}
