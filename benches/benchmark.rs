//! パフォーマンスベンチマーク
//!
//! このモジュールは、xlsxrowsクレートのパフォーマンスを測定するためのベンチマークを提供します。
//! 入力のワークブックはrust_xlsxwriterでメモリ上に生成します。
//!
//! 実装するベンチマーク:
//! - 行数ごとの読み取り速度（共有文字列と数値が混在するシート）
//! - 出力フォーマットごとの変換速度
//! - 単一ワークシートXMLの解析速度（パッケージ展開なし）

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_xlsxwriter::{Workbook, XlsxError};
use std::io::Cursor;
use xlsxrows::{parse_sheet, OutputFormat, ReaderBuilder, SharedStringTable};

const COLUMNS: u16 = 8;

/// `rows`行×8列のワークブックを生成（偶数列は文字列、奇数列は数値）
fn generate_workbook(rows: u32) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for row in 0..rows {
        for col in 0..COLUMNS {
            if col % 2 == 0 {
                worksheet.write_string(row, col, &format!("item-{}-{}", row % 1000, col))?;
            } else {
                worksheet.write_number(row, col, row as f64 * 1.25 + col as f64)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// 共有文字列を使わないワークシートXMLを生成
fn generate_sheet_xml(rows: usize) -> String {
    let mut xml = String::from(r#"<worksheet><sheetData>"#);
    for row in 1..=rows {
        xml.push_str(&format!(r#"<row r="{}">"#, row));
        for col in 0..COLUMNS as usize {
            let name = xlsxrows::column_name(col);
            if col % 2 == 0 {
                xml.push_str(&format!(
                    r#"<c r="{}{}" t="inlineStr"><is><t>text {}</t></is></c>"#,
                    name, row, row
                ));
            } else {
                xml.push_str(&format!(r#"<c r="{}{}"><v>{}.5</v></c>"#, name, row, row));
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// 行数ごとの読み取り速度
fn benchmark_read(c: &mut Criterion) {
    let reader = ReaderBuilder::new()
        .with_columns(COLUMNS as usize)
        .build()
        .unwrap();

    let mut group = c.benchmark_group("read");
    for rows in [1_000u32, 10_000, 50_000] {
        let data = generate_workbook(rows).unwrap();
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &data, |b, data| {
            b.iter(|| {
                let table = reader.read(Cursor::new(black_box(data))).unwrap();
                black_box(table)
            });
        });
    }
    group.finish();
}

/// 出力フォーマットごとの変換速度
fn benchmark_convert(c: &mut Criterion) {
    let data = generate_workbook(10_000).unwrap();

    let mut group = c.benchmark_group("convert");
    group.sample_size(20);
    for (name, format) in [
        ("csv", OutputFormat::Csv),
        ("json", OutputFormat::Json),
        ("markdown", OutputFormat::Markdown),
    ] {
        let reader = ReaderBuilder::new()
            .with_columns(COLUMNS as usize)
            .with_output_format(format)
            .build()
            .unwrap();

        group.bench_function(name, |b| {
            b.iter(|| {
                let mut output = Vec::new();
                reader
                    .convert(Cursor::new(black_box(&data)), &mut output)
                    .unwrap();
                black_box(output)
            });
        });
    }
    group.finish();
}

/// 単一ワークシートXMLの解析速度
fn benchmark_parse_sheet(c: &mut Criterion) {
    let xml = generate_sheet_xml(20_000);
    let strings = SharedStringTable::default();

    let mut group = c.benchmark_group("parse_sheet");
    group.throughput(Throughput::Bytes(xml.len() as u64));
    group.bench_function("inline_strings_and_numbers", |b| {
        b.iter(|| {
            let rows = parse_sheet(black_box(xml.as_bytes()), &strings, COLUMNS as usize).unwrap();
            black_box(rows)
        });
    });
    group.finish();
}

criterion_group!(benches, benchmark_read, benchmark_convert, benchmark_parse_sheet);
criterion_main!(benches);
