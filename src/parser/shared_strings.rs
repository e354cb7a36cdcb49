//! Shared Strings Module
//!
//! `xl/sharedStrings.xml`（`<sst>`要素）を読み込み、インデックスで参照できる
//! 読み取り専用の文字列テーブルを構築するモジュール。

use std::io::BufRead;

use quick_xml::events::BytesStart;

use crate::error::{IndexKind, Result, XlsxRowsError};
use crate::parser::events::{attribute, drive, MarkupHandler};

/// `uniqueCount`属性から事前確保する要素数の上限
const MAX_PREALLOCATED_STRINGS: usize = 1 << 16;

/// 共有文字列テーブル
///
/// パッケージごとに1回だけ構築され、以後は変更されません。
/// 各エントリはリッチテキストの書式を取り除いたプレーンテキストです。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedStringTable {
    strings: Vec<String>,
}

impl SharedStringTable {
    /// `<sst>`要素のXMLストリームからテーブルを構築
    ///
    /// `<si>`ごとに1エントリを作り、その中のすべての`<t>`のテキストを連結します。
    /// ふりがな（`<rPh>`）の中のテキストは含めません。
    ///
    /// # 戻り値
    ///
    /// * `Ok(SharedStringTable)` - 構築に成功した場合
    /// * `Err(XlsxRowsError::Package)` - XMLが不正な場合
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut handler = SharedStringsHandler::default();
        drive(reader, &mut handler)?;
        Ok(Self {
            strings: handler.strings,
        })
    }

    /// `index`番目のエントリを取得
    ///
    /// # 戻り値
    ///
    /// * `Ok(&str)` - エントリのテキスト
    /// * `Err(XlsxRowsError::IndexOutOfRange)` - `index >= len()`の場合
    pub fn get(&self, index: usize) -> Result<&str> {
        self.strings
            .get(index)
            .map(String::as_str)
            .ok_or(XlsxRowsError::IndexOutOfRange {
                kind: IndexKind::SharedString,
                index,
                bound: self.strings.len(),
            })
    }

    /// エントリ数
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// エントリが1つもないかどうか
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl From<Vec<String>> for SharedStringTable {
    fn from(strings: Vec<String>) -> Self {
        Self { strings }
    }
}

#[derive(Default)]
struct SharedStringsHandler {
    strings: Vec<String>,
    current: String,
    in_si: bool,
    in_t: bool,
    in_phonetic: bool,
}

impl MarkupHandler for SharedStringsHandler {
    fn start_element(&mut self, element: &BytesStart<'_>) -> Result<()> {
        match element.local_name().as_ref() {
            b"sst" => {
                if let Some(count) = attribute(element, b"uniqueCount")? {
                    if let Ok(count) = count.parse::<usize>() {
                        self.strings.reserve(count.min(MAX_PREALLOCATED_STRINGS));
                    }
                }
            }
            b"si" => {
                self.in_si = true;
                self.current.clear();
            }
            b"rPh" => self.in_phonetic = true,
            b"t" if self.in_si && !self.in_phonetic => self.in_t = true,
            _ => {}
        }
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<()> {
        if self.in_t {
            self.current.push_str(text);
        }
        Ok(())
    }

    fn end_element(&mut self, local_name: &[u8]) -> Result<()> {
        match local_name {
            b"t" => self.in_t = false,
            b"rPh" => self.in_phonetic = false,
            b"si" => {
                self.strings.push(std::mem::take(&mut self.current));
                self.in_si = false;
            }
            _ => {}
        }
        Ok(())
    }
}
