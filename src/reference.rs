//! Cell Reference Module
//!
//! A1形式のセル参照と0始まりの列インデックスを相互変換するモジュール。
//! 列名は「0を表す桁を持たない」26進数（bijective base-26）で表現されます。

use crate::error::{Result, XlsxRowsError};

/// セル参照から0始まりの列インデックスを求める
///
/// 先頭から最初の数字までを列名とみなし、`acc = (acc + 1) * 26 + (letter - 'A')`
/// を`acc = -1`から畳み込みます（A→0, Z→25, AA→26, BA→52）。
///
/// # 引数
///
/// * `reference` - セル参照（例: `"AA3"`）
///
/// # 戻り値
///
/// * `Ok(usize)` - 列インデックス
/// * `Err(XlsxRowsError::MalformedReference)` - 数字がない、英大文字で始まらない、
///   英大文字・数字以外を含む、桁あふれした場合
pub fn column_index(reference: &str) -> Result<usize> {
    let malformed = || XlsxRowsError::MalformedReference(reference.to_string());

    let first_digit = reference
        .bytes()
        .position(|b| b.is_ascii_digit())
        .ok_or_else(malformed)?;
    let (letters, digits) = reference.split_at(first_digit);

    if letters.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    // acc + 1 を保持して、開始値 -1 を符号なしで表す
    let mut next: usize = 0;
    for b in letters.bytes() {
        if !b.is_ascii_uppercase() {
            return Err(malformed());
        }
        next = next
            .checked_mul(26)
            .and_then(|n| n.checked_add(usize::from(b - b'A') + 1))
            .ok_or_else(malformed)?;
    }

    Ok(next - 1)
}

/// 列インデックスを列名に変換（0 -> "A", 25 -> "Z", 26 -> "AA"）
pub fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(char::from(b'A' + (index % 26) as u8));
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_index_single_letters() {
        assert_eq!(column_index("A1").unwrap(), 0);
        assert_eq!(column_index("B7").unwrap(), 1);
        assert_eq!(column_index("Z1").unwrap(), 25);
    }

    #[test]
    fn test_column_index_double_letters() {
        assert_eq!(column_index("AA1").unwrap(), 26);
        assert_eq!(column_index("AB1").unwrap(), 27);
        assert_eq!(column_index("AZ1").unwrap(), 51);
        assert_eq!(column_index("BA1").unwrap(), 52);
        assert_eq!(column_index("ZZ1").unwrap(), 701);
    }

    #[test]
    fn test_column_index_excel_maximum() {
        // Excelの最大列 XFD = 16384列目
        assert_eq!(column_index("XFD1048576").unwrap(), 16_383);
    }

    #[test]
    fn test_column_index_ignores_row_number() {
        assert_eq!(column_index("C3").unwrap(), column_index("C300").unwrap());
    }

    #[test]
    fn test_column_index_without_digit() {
        assert!(matches!(
            column_index("AB"),
            Err(XlsxRowsError::MalformedReference(_))
        ));
        assert!(matches!(
            column_index(""),
            Err(XlsxRowsError::MalformedReference(_))
        ));
    }

    #[test]
    fn test_column_index_without_letters() {
        assert!(matches!(
            column_index("12"),
            Err(XlsxRowsError::MalformedReference(_))
        ));
    }

    #[test]
    fn test_column_index_invalid_characters() {
        for reference in ["a1", "A-1", "A1B", "$A$1", "Ä1", "A 1"] {
            assert!(
                matches!(
                    column_index(reference),
                    Err(XlsxRowsError::MalformedReference(_))
                ),
                "{} should be rejected",
                reference
            );
        }
    }

    #[test]
    fn test_column_index_overflow() {
        let reference = format!("{}1", "Z".repeat(40));
        assert!(matches!(
            column_index(&reference),
            Err(XlsxRowsError::MalformedReference(_))
        ));
    }

    #[test]
    fn test_column_name() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(51), "AZ");
        assert_eq!(column_name(52), "BA");
        assert_eq!(column_name(16_383), "XFD");
    }

    proptest! {
        #[test]
        fn prop_column_name_resolves_back(index in 0usize..1_000_000, row in 1u32..1_048_577) {
            let reference = format!("{}{}", column_name(index), row);
            prop_assert_eq!(column_index(&reference).unwrap(), index);
        }
    }
}
