//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::fmt;

use thiserror::Error;

/// 範囲外アクセスの対象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// 共有文字列テーブルのインデックス
    SharedString,
    /// 行バッファの列インデックス
    Column,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::SharedString => write!(f, "shared string index"),
            IndexKind::Column => write!(f, "column index"),
        }
    }
}

/// xlsxrowsクレート全体で使用するエラー型
///
/// 1回の読み込み処理は「成功」か「最初に発生したエラー」のどちらかで終わります。
/// 途中までの行が返されることはありません。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー
/// - `Package`: パッケージ（ZIP/XML構造）が開けない、または不正
/// - `MalformedReference`: セル参照（例: `AA3`）を列番号に変換できない
/// - `IndexOutOfRange`: 共有文字列インデックス、または列インデックスが範囲外
/// - `Format`: セルの型宣言どおりに値を解釈できない
/// - `Config`: 設定の検証に失敗した
/// - `SecurityViolation`: セキュリティ制限に違反した
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxrows::{ReaderBuilder, XlsxRowsError};
///
/// fn count_rows(path: &str) -> Result<usize, XlsxRowsError> {
///     let reader = ReaderBuilder::new().with_columns(4).build()?;
///     let table = reader.read_path(path)?;
///     Ok(table.len())
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxRowsError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// パッケージが開けない、または構造が不正
    ///
    /// ZIPアーカイブとして読めない、必須パートが存在しない、
    /// XMLが壊れている、などの場合に発生します。
    #[error("Invalid package: {0}")]
    Package(String),

    /// セル参照を列アドレスに変換できない
    #[error("Malformed cell reference: {0}")]
    MalformedReference(String),

    /// インデックスが範囲外
    ///
    /// 共有文字列テーブルの範囲外参照、または設定された列数を超える
    /// 列アドレスが検出された場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust
    /// use xlsxrows::{IndexKind, XlsxRowsError};
    ///
    /// let error = XlsxRowsError::IndexOutOfRange {
    ///     kind: IndexKind::Column,
    ///     index: 5,
    ///     bound: 3,
    /// };
    /// assert_eq!(error.to_string(), "column index 5 is out of range (bound: 3)");
    /// ```
    #[error("{kind} {index} is out of range (bound: {bound})")]
    IndexOutOfRange {
        /// 範囲外アクセスの対象
        kind: IndexKind,
        /// 要求されたインデックス
        index: usize,
        /// 有効なインデックスの上限（このインデックス自体は無効）
        bound: usize,
    },

    /// セルの値を宣言された型として解釈できない
    #[error("Format error: {0}")]
    Format(String),

    /// 設定の検証に失敗したエラー
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// ZIP bomb、パストラバーサル、ファイルサイズ制限などに違反した場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

impl From<zip::result::ZipError> for XlsxRowsError {
    fn from(err: zip::result::ZipError) -> Self {
        XlsxRowsError::Package(format!("ZIP archive error: {}", err))
    }
}

impl From<quick_xml::Error> for XlsxRowsError {
    fn from(err: quick_xml::Error) -> Self {
        XlsxRowsError::Package(format!("XML parse error: {}", err))
    }
}

/// クレート共通の`Result`型
pub type Result<T> = std::result::Result<T, XlsxRowsError>;
