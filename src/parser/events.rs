//! Markup Event Module
//!
//! quick-xmlのイベントを「要素開始・文字データ・要素終了」の3種類に
//! 正規化して、ハンドラーに順方向で配送するモジュール。

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Result, XlsxRowsError};

/// マークアップイベントを受け取るハンドラー
///
/// 要素名は名前空間接頭辞を除いたローカル名で渡されます。
/// 自己終了タグ（`<row/>`）は開始と終了の2イベントとして届きます。
pub(crate) trait MarkupHandler {
    /// 要素の開始
    fn start_element(&mut self, element: &BytesStart<'_>) -> Result<()>;

    /// 文字データ（エンティティ展開済み）
    fn characters(&mut self, text: &str) -> Result<()>;

    /// 要素の終了
    fn end_element(&mut self, local_name: &[u8]) -> Result<()>;
}

/// XMLストリームを最後まで読み、イベントをハンドラーに配送する
///
/// テキストはトリムしません（インライン文字列の前後の空白も値の一部）。
pub(crate) fn drive<R: BufRead, H: MarkupHandler>(source: R, handler: &mut H) -> Result<()> {
    let mut reader = Reader::from_reader(source);
    reader.expand_empty_elements(true);
    reader.trim_text(false);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => handler.start_element(&e)?,
            Event::End(e) => handler.end_element(e.local_name().as_ref())?,
            Event::Text(e) => {
                let text = e.unescape()?;
                handler.characters(&text)?;
            }
            Event::CData(e) => {
                let bytes = e.into_inner();
                let text = std::str::from_utf8(&bytes).map_err(|e| {
                    XlsxRowsError::Package(format!("CDATA section is not valid UTF-8: {}", e))
                })?;
                handler.characters(text)?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// 属性値を取得（エンティティ展開済み）
///
/// 属性名は接頭辞を含めた完全一致で比較します。
pub(crate) fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    let attr = element
        .try_get_attribute(name)
        .map_err(quick_xml::Error::from)?;
    match attr {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}
