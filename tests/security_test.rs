//! Security Tests
//!
//! セキュリティ対策のテストケースを実装します。
//! ZIP bomb攻撃、パストラバーサル攻撃などへの対策を検証します。
//! 違反はどの行を出力するよりも前に検出されます。

use std::io::{Cursor, Write};
use xlsxrows::{ReaderBuilder, XlsxRowsError};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

fn archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip_data = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_data));
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);

        for (name, content) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content).unwrap();
        }

        zip.finish().unwrap();
    }
    zip_data
}

fn read(data: Vec<u8>) -> Result<xlsxrows::Table, XlsxRowsError> {
    let reader = ReaderBuilder::new().with_columns(4).build().unwrap();
    reader.read(Cursor::new(data))
}

/// ZIP bomb攻撃のテスト: 大量のファイルを含むZIPアーカイブ
#[test]
fn test_zip_bomb_too_many_files() {
    // 10,001個のファイルを含むZIPアーカイブを作成（上限: 10,000）
    let mut zip_data = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_data));
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);

        for i in 0..10_001 {
            let file_name = format!("xl/file{}.xml", i);
            zip.start_file(file_name, options).unwrap();
            zip.write_all(b"test").unwrap();
        }

        zip.finish().unwrap();
    }

    match read(zip_data) {
        Err(XlsxRowsError::SecurityViolation(msg)) => {
            assert!(msg.contains("too many files"));
        }
        e => panic!("Unexpected result: {:?}", e),
    }
}

/// ZIP bomb攻撃のテスト: 展開後のサイズが大きすぎるエントリ
#[test]
#[ignore] // 大きなファイルを作成するため、通常のテストではスキップ
fn test_zip_bomb_large_entry() {
    // 100MB + 1バイト（単一ファイルの上限: 100MB）
    let large_data = vec![0u8; 104_857_601];
    let mut zip_data = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_data));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
        zip.write_all(&large_data).unwrap();
        zip.finish().unwrap();
    }

    match read(zip_data) {
        Err(XlsxRowsError::SecurityViolation(msg)) => {
            assert!(msg.contains("exceeds maximum size"));
        }
        e => panic!("Unexpected result: {:?}", e),
    }
}

/// パストラバーサル攻撃のテスト: `..`を含むパス
#[test]
fn test_path_traversal_dotdot() {
    let data = archive(&[("../etc/passwd", b"test")]);

    match read(data) {
        Err(XlsxRowsError::SecurityViolation(msg)) => {
            assert!(msg.contains("Path traversal"));
        }
        e => panic!("Unexpected result: {:?}", e),
    }
}

/// パストラバーサル攻撃のテスト: 絶対パス
#[test]
fn test_path_traversal_absolute_path() {
    let data = archive(&[("/etc/passwd", b"test")]);

    match read(data) {
        Err(XlsxRowsError::SecurityViolation(msg)) => {
            assert!(msg.contains("Absolute path"));
        }
        e => panic!("Unexpected result: {:?}", e),
    }
}

/// パストラバーサル攻撃のテスト: Windows形式の絶対パス
#[test]
fn test_path_traversal_windows_absolute_path() {
    let data = archive(&[("C:\\Windows\\system32", b"test")]);

    match read(data) {
        Err(XlsxRowsError::SecurityViolation(msg)) => {
            assert!(msg.contains("Absolute path") || msg.contains("Backslash"));
        }
        e => panic!("Unexpected result: {:?}", e),
    }
}

/// リレーションシップのターゲットがパッケージの外を指す場合
#[test]
fn test_relationship_target_escaping_package() {
    let data = archive(&[
        (
            "xl/workbook.xml",
            br#"<workbook xmlns:r="urn:r"><sheets><sheet name="S" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        ),
        (
            "xl/_rels/workbook.xml.rels",
            br#"<Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="../../etc/passwd"/></Relationships>"#,
        ),
    ]);

    assert!(matches!(read(data), Err(XlsxRowsError::Package(_))));
}

/// 外部リレーションシップはワークシートとして扱わない
#[test]
fn test_external_worksheet_relationship_is_skipped() {
    let data = archive(&[
        (
            "xl/workbook.xml",
            br#"<workbook xmlns:r="urn:r"><sheets><sheet name="S" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        ),
        (
            "xl/_rels/workbook.xml.rels",
            br#"<Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="http://example.com/sheet.xml" TargetMode="External"/></Relationships>"#,
        ),
    ]);

    assert!(read(data).unwrap().is_empty());
}

/// 正常な最小構成のパッケージはセキュリティエラーにならない
#[test]
fn test_valid_file_processing() {
    let data = archive(&[
        (
            "xl/workbook.xml",
            br#"<?xml version="1.0"?><workbook xmlns:r="urn:r"><sheets><sheet name="S" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        ),
        (
            "xl/_rels/workbook.xml.rels",
            br#"<?xml version="1.0"?><Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#,
        ),
        (
            "xl/worksheets/sheet1.xml",
            br#"<?xml version="1.0"?><worksheet><sheetData><row r="1"><c r="D1"><v>1</v></c></row></sheetData></worksheet>"#,
        ),
    ]);

    let table = read(data).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table[0].get(3), Some("1"));
}
