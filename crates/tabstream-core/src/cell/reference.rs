//! A1-style reference codec
//!
//! Converts between zero-based indices and spreadsheet reference text:
//! rows are 1-based decimal numbers, columns are bijective base-26 letters
//! (`A`..`Z`, `AA`..`ZZ`, `AAA`, ...). Column letters decode case-insensitively.
//!
//! ```
//! use tabstream_core::cell::reference;
//!
//! assert_eq!(reference::column_reference(27), "AB");
//! assert_eq!(reference::cell_index("AA10").unwrap(), (9, 26));
//! assert_eq!(reference::range_reference(0, 0, 1, 1), "A1:B2");
//! ```

use crate::error::{Error, Result};

const LETTERS: u64 = 26;

/// Encode a zero-based row index as its 1-based row number
pub fn row_reference(index: u32) -> String {
    (u64::from(index) + 1).to_string()
}

/// Encode a zero-based column index as bijective base-26 letters (0 = A, 26 = AA)
pub fn column_reference(index: u32) -> String {
    let mut letters = Vec::new();
    let mut n = u64::from(index) + 1;

    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % LETTERS) as u8);
        n /= LETTERS;
    }

    letters.iter().rev().map(|&b| b as char).collect()
}

/// Encode a cell position (e.g. `(9, 26)` -> `"AA10"`)
pub fn cell_reference(row: u32, col: u32) -> String {
    let mut text = column_reference(col);
    text.push_str(&row_reference(row));
    text
}

/// Encode a range from its top-left and bottom-right corners
pub fn range_reference(row1: u32, col1: u32, row2: u32, col2: u32) -> String {
    format!("{}:{}", cell_reference(row1, col1), cell_reference(row2, col2))
}

/// Decode a 1-based row number into a zero-based row index
pub fn row_index(reference: &str) -> Result<u32> {
    let invalid = || Error::InvalidRowReference(reference.to_string());

    if reference.is_empty() || !reference.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let number: u64 = reference.parse().map_err(|_| invalid())?;
    if number < 1 {
        return Err(invalid());
    }
    u32::try_from(number - 1).map_err(|_| invalid())
}

/// Decode column letters into a zero-based column index
pub fn column_index(reference: &str) -> Result<u32> {
    let invalid = || Error::InvalidColumnReference(reference.to_string());

    if reference.is_empty() {
        return Err(invalid());
    }

    // Accumulate in 1-based form so "A" = 1, "Z" = 26, "AA" = 27.
    let mut n: u64 = 0;
    for b in reference.bytes() {
        if !b.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let digit = u64::from(b.to_ascii_uppercase() - b'A') + 1;
        n = n
            .checked_mul(LETTERS)
            .and_then(|n| n.checked_add(digit))
            .filter(|&n| n <= u64::from(u32::MAX) + 1)
            .ok_or_else(invalid)?;
    }

    Ok((n - 1) as u32)
}

/// Decode a cell reference into `(row, col)`
///
/// The column part runs up to the first decimal digit; the rest is the row.
pub fn cell_index(reference: &str) -> Result<(u32, u32)> {
    let invalid = || Error::InvalidCellReference(reference.to_string());

    let split = reference
        .bytes()
        .position(|b| b.is_ascii_digit())
        .ok_or_else(invalid)?;
    let (col_part, row_part) = reference.split_at(split);

    let row = row_index(row_part).map_err(|_| invalid())?;
    let col = column_index(col_part).map_err(|_| invalid())?;
    Ok((row, col))
}

/// Decode a range reference into `(row1, col1, row2, col2)`
///
/// The second corner must not lie above or left of the first.
pub fn range_index(reference: &str) -> Result<(u32, u32, u32, u32)> {
    let invalid = || Error::InvalidRangeReference(reference.to_string());

    let (first, second) = reference.split_once(':').ok_or_else(invalid)?;
    let (row1, col1) = cell_index(first).map_err(|_| invalid())?;
    let (row2, col2) = cell_index(second).map_err(|_| invalid())?;

    if row2 < row1 || col2 < col1 {
        return Err(invalid());
    }
    Ok((row1, col1, row2, col2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    #[test]
    fn test_column_reference() {
        assert_eq!(column_reference(0), "A");
        assert_eq!(column_reference(1), "B");
        assert_eq!(column_reference(25), "Z");
        assert_eq!(column_reference(26), "AA");
        assert_eq!(column_reference(51), "AZ");
        assert_eq!(column_reference(52), "BA");
        assert_eq!(column_reference(701), "ZZ");
        assert_eq!(column_reference(702), "AAA");
        assert_eq!(column_reference(16383), "XFD");
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A").unwrap(), 0);
        assert_eq!(column_index("Z").unwrap(), 25);
        assert_eq!(column_index("AA").unwrap(), 26);
        assert_eq!(column_index("ZZ").unwrap(), 701);
        assert_eq!(column_index("AAA").unwrap(), 702);
        assert_eq!(column_index("XFD").unwrap(), 16383);

        // Case insensitive
        assert_eq!(column_index("a").unwrap(), 0);
        assert_eq!(column_index("xfd").unwrap(), 16383);
        assert_eq!(column_index("aA").unwrap(), 26);
    }

    #[test]
    fn test_column_index_errors() {
        assert!(matches!(column_index(""), Err(Error::InvalidColumnReference(_))));
        assert!(matches!(column_index("A1"), Err(Error::InvalidColumnReference(_))));
        assert!(matches!(column_index("$A"), Err(Error::InvalidColumnReference(_))));
        assert!(matches!(column_index("É"), Err(Error::InvalidColumnReference(_))));
        // Beyond u32
        assert!(column_index("ZZZZZZZZ").is_err());
    }

    #[test]
    fn test_column_extremes() {
        let last = column_reference(u32::MAX);
        assert_eq!(column_index(&last).unwrap(), u32::MAX);
    }

    #[test]
    fn test_row_reference_and_index() {
        assert_eq!(row_reference(0), "1");
        assert_eq!(row_reference(122), "123");
        assert_eq!(row_reference(u32::MAX), "4294967296");

        assert_eq!(row_index("1").unwrap(), 0);
        assert_eq!(row_index("123").unwrap(), 122);
        assert_eq!(row_index("4294967296").unwrap(), u32::MAX);
    }

    #[test]
    fn test_row_index_errors() {
        for text in ["", "0", "-1", "+1", "1.5", "A", " 1", "4294967297"] {
            let err = row_index(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{text:?}");
        }
    }

    #[test]
    fn test_cell_reference() {
        assert_eq!(cell_reference(0, 0), "A1");
        assert_eq!(cell_reference(9, 26), "AA10");
        assert_eq!(cell_reference(99, 2), "C100");
    }

    #[test]
    fn test_cell_index() {
        assert_eq!(cell_index("A1").unwrap(), (0, 0));
        assert_eq!(cell_index("AA10").unwrap(), (9, 26));
        assert_eq!(cell_index("c100").unwrap(), (99, 2));
    }

    #[test]
    fn test_cell_index_errors() {
        for text in ["", "A", "1", "A0", "A1B", "$A$1", "1A"] {
            assert!(
                matches!(cell_index(text), Err(Error::InvalidCellReference(_))),
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_range_reference() {
        assert_eq!(range_reference(0, 0, 1, 1), "A1:B2");
        assert_eq!(range_index("A1:B2").unwrap(), (0, 0, 1, 1));
        assert_eq!(range_index("B2:B2").unwrap(), (1, 1, 1, 1));
        assert_eq!(range_index("a1:aa10").unwrap(), (0, 0, 9, 26));
    }

    #[test]
    fn test_range_index_errors() {
        for text in ["B2:A1", "A2:B1", "B1:A2", "A1", "A1:", ":B2", "A1:B2:C3"] {
            assert!(
                matches!(range_index(text), Err(Error::InvalidRangeReference(_))),
                "{text:?}"
            );
        }
    }

    proptest! {
        #[test]
        fn prop_column_round_trip(index in any::<u32>()) {
            prop_assert_eq!(column_index(&column_reference(index)).unwrap(), index);
        }

        #[test]
        fn prop_row_round_trip(index in any::<u32>()) {
            prop_assert_eq!(row_index(&row_reference(index)).unwrap(), index);
        }

        #[test]
        fn prop_range_round_trip(
            row1 in 0u32..100_000,
            col1 in 0u32..20_000,
            rows in 0u32..1000,
            cols in 0u32..1000,
        ) {
            let text = range_reference(row1, col1, row1 + rows, col1 + cols);
            prop_assert_eq!(
                range_index(&text).unwrap(),
                (row1, col1, row1 + rows, col1 + cols)
            );
        }

        #[test]
        fn prop_column_letters_only(index in any::<u32>()) {
            let text = column_reference(index);
            prop_assert!(text.bytes().all(|b| b.is_ascii_uppercase()));
        }
    }
}
