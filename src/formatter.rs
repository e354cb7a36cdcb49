//! Formatter Module
//!
//! 値要素（`<v>` / `<t>`）で取得した生テキストを、セル型に応じて
//! 最終的な文字列表現に変換するモジュール。

use crate::error::{Result, XlsxRowsError};
use crate::parser::SharedStringTable;
use crate::types::CellType;

/// 丸め後の整数部の最大桁数
///
/// XLSXの数値はIEEE 754倍精度なので、整数部は最大でも309桁です。
const MAX_INTEGER_DIGITS: usize = 1024;

/// セル値デコーダー
///
/// 共有文字列テーブルを借用し、1セル分の生テキストを文字列に変換します。
#[derive(Debug, Clone, Copy)]
pub(crate) struct CellDecoder<'a> {
    strings: &'a SharedStringTable,
}

impl<'a> CellDecoder<'a> {
    pub fn new(strings: &'a SharedStringTable) -> Self {
        Self { strings }
    }

    /// セル値をデコード
    ///
    /// # 引数
    ///
    /// * `cell_type` - `<c>`要素で宣言されたセル型
    /// * `raw` - 値要素の開始から終了までに取得したテキスト
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - デコード結果（値が空の場合は空文字列）
    /// * `Err(XlsxRowsError::Format)` - 宣言された型として解釈できない場合
    /// * `Err(XlsxRowsError::IndexOutOfRange)` - 共有文字列インデックスが範囲外の場合
    pub fn decode(&self, cell_type: CellType, raw: &str) -> Result<String> {
        match cell_type {
            CellType::SharedStringIndex => {
                let index = raw.parse::<usize>().map_err(|e| {
                    XlsxRowsError::Format(format!(
                        "shared string index '{}' is not a non-negative integer: {}",
                        raw, e
                    ))
                })?;
                Ok(self.strings.get(index)?.to_string())
            }
            CellType::InlineString => Ok(raw.to_string()),
            CellType::Number => {
                if raw.trim().is_empty() {
                    return Ok(String::new());
                }
                round_half_up(raw)
            }
        }
    }
}

/// 10進数文字列を最も近い整数に丸める（round half up: 0.5は0から遠い方へ）
///
/// 2進浮動小数点を経由せず、10進の桁列のまま丸めるため、
/// `"2.4999999999999999999"`は`"2"`、`"-2.5"`は`"-3"`になります。
/// 指数表記（`"1.5E3"`）にも対応します。結果が0の場合は符号を付けません。
pub(crate) fn round_half_up(text: &str) -> Result<String> {
    let invalid = || XlsxRowsError::Format(format!("'{}' is not a decimal number", text));

    let s = text.trim();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (mantissa, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
        Some(pos) => {
            let exp = &s[pos + 1..];
            let unsigned = exp.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(exp);
            if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            // 桁あふれするほど大きな指数は数値として扱わない
            let exp = exp.parse::<i64>().map_err(|_| invalid())?;
            (&s[..pos], exp)
        }
        None => (s, 0),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    if (int_part.is_empty() && frac_part.is_empty())
        || !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes())
        .map(|b| b - b'0')
        .collect();

    // 小数点の位置（digitsの先頭から数えた整数部の桁数）
    let point = (int_part.len() as i64)
        .checked_add(exponent)
        .ok_or_else(invalid)?;

    let (mut integer, round_up) = if point <= 0 {
        let first_dropped = if point == 0 { digits[0] } else { 0 };
        (Vec::new(), first_dropped >= 5)
    } else {
        let point = point as usize;
        if point > MAX_INTEGER_DIGITS + digits.len() {
            return Err(invalid());
        }
        if point >= digits.len() {
            let mut integer = digits.clone();
            integer.resize(point, 0);
            (integer, false)
        } else {
            (digits[..point].to_vec(), digits[point] >= 5)
        }
    };

    if round_up {
        increment(&mut integer);
    }

    let start = integer
        .iter()
        .position(|&d| d != 0)
        .unwrap_or(integer.len());
    let integer = &integer[start..];
    if integer.is_empty() {
        return Ok("0".to_string());
    }
    if integer.len() > MAX_INTEGER_DIGITS {
        return Err(invalid());
    }

    let mut out = String::with_capacity(integer.len() + 1);
    if negative {
        out.push('-');
    }
    out.extend(integer.iter().map(|&d| char::from(b'0' + d)));
    Ok(out)
}

/// 10進の桁列に1を加える
fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, 1);
}
