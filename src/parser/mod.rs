//! Parser Module
//!
//! XLSXパッケージの読み込みと、ワークシートXMLのストリーミング解析。
//! DOMを構築せず、quick-xmlのイベントを順方向に処理します。

mod events;
mod package;
mod shared_strings;
mod sheet;
mod workbook;

pub use shared_strings::SharedStringTable;
pub use sheet::parse_sheet;
pub(crate) use workbook::WorkbookParser;
