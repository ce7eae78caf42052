//! Cell address and range types

use crate::cell::reference;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1", "AA10")
///
/// Rows and columns are zero-based; the text form is 1-based for rows and
/// bijective base-26 letters for columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ..., AA=26)
    pub col: u32,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parse a cell address from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use tabstream_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("B3").unwrap();
    /// assert_eq!(addr.row, 2);
    /// assert_eq!(addr.col, 1);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let (row, col) = reference::cell_index(s)?;
        Ok(Self { row, col })
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        reference::cell_reference(self.row, self.col)
    }

    /// Create a range from this address to another
    ///
    /// Fails if `other` lies above or left of `self`.
    pub fn to(&self, other: CellAddress) -> Result<CellRange> {
        CellRange::new(*self, other)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangular range of cells (e.g., "A1:B10")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRange {
    /// Start address (top-left)
    pub start: CellAddress,
    /// End address (bottom-right)
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range
    ///
    /// Unlike a normalizing constructor, corners given out of order are
    /// rejected, matching the text grammar.
    pub fn new(start: CellAddress, end: CellAddress) -> Result<Self> {
        if end.row < start.row || end.col < start.col {
            return Err(Error::InvalidRangeReference(format!("{}:{}", start, end)));
        }
        Ok(Self { start, end })
    }

    /// Create a single-cell range
    pub fn single(addr: CellAddress) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Parse a range from A1:B10 notation
    pub fn parse(s: &str) -> Result<Self> {
        let (row1, col1, row2, col2) = reference::range_index(s)?;
        Ok(Self {
            start: CellAddress::new(row1, col1),
            end: CellAddress::new(row2, col2),
        })
    }

    /// Check if a cell is within this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u64 {
        u64::from(self.end.row - self.start.row) + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u64 {
        u64::from(self.end.col - self.start.col) + 1
    }

    /// Get the total number of cells in the range
    pub fn cell_count(&self) -> u64 {
        self.row_count() * self.col_count()
    }

    /// Iterate over all cell addresses in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            next: Some(self.start),
        }
    }

    /// Format as A1:B10 string
    pub fn to_a1_string(&self) -> String {
        reference::range_reference(self.start.row, self.start.col, self.end.row, self.end.col)
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over cells in a range
pub struct CellRangeIterator {
    range: CellRange,
    next: Option<CellAddress>,
}

impl Iterator for CellRangeIterator {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        let addr = self.next?;

        self.next = if addr.col < self.range.end.col {
            Some(CellAddress::new(addr.row, addr.col + 1))
        } else if addr.row < self.range.end.row {
            Some(CellAddress::new(addr.row + 1, self.range.start.col))
        } else {
            None
        };

        Some(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cell_address_parse() {
        let addr = CellAddress::parse("A1").unwrap();
        assert_eq!(addr, CellAddress::new(0, 0));

        let addr: CellAddress = "AA10".parse().unwrap();
        assert_eq!(addr, CellAddress::new(9, 26));

        assert!(CellAddress::parse("").is_err());
        assert!(CellAddress::parse("A").is_err());
        assert!(CellAddress::parse("A0").is_err());
        assert!(CellAddress::parse("$A$1").is_err());
    }

    #[test]
    fn test_cell_address_display() {
        assert_eq!(CellAddress::new(0, 0).to_string(), "A1");
        assert_eq!(CellAddress::new(99, 2).to_string(), "C100");
        assert_eq!(CellAddress::new(0, 702).to_string(), "AAA1");
    }

    #[test]
    fn test_cell_range_parse() {
        let range = CellRange::parse("A1:B2").unwrap();
        assert_eq!(range.start, CellAddress::new(0, 0));
        assert_eq!(range.end, CellAddress::new(1, 1));
        assert_eq!(range.to_string(), "A1:B2");

        assert!(CellRange::parse("B2:A1").is_err());
        assert!(CellRange::parse("C3").is_err());
    }

    #[test]
    fn test_cell_range_new_rejects_reversed() {
        let a1 = CellAddress::new(0, 0);
        let b2 = CellAddress::new(1, 1);
        assert!(a1.to(b2).is_ok());
        assert!(matches!(b2.to(a1), Err(Error::InvalidRangeReference(_))));
        assert_eq!(CellRange::single(b2).cell_count(), 1);
    }

    #[test]
    fn test_cell_range_contains() {
        let range = CellRange::parse("B2:D4").unwrap();

        assert!(range.contains(&CellAddress::new(1, 1))); // B2
        assert!(range.contains(&CellAddress::new(3, 3))); // D4
        assert!(range.contains(&CellAddress::new(2, 2))); // C3

        assert!(!range.contains(&CellAddress::new(0, 0))); // A1
        assert!(!range.contains(&CellAddress::new(4, 1))); // B5
    }

    #[test]
    fn test_cell_range_iterator() {
        let range = CellRange::parse("A1:B2").unwrap();
        let cells: Vec<_> = range.cells().collect();

        assert_eq!(
            cells,
            vec![
                CellAddress::new(0, 0),
                CellAddress::new(0, 1),
                CellAddress::new(1, 0),
                CellAddress::new(1, 1),
            ]
        );
        assert_eq!(range.row_count(), 2);
        assert_eq!(range.col_count(), 2);
    }

    #[test]
    fn test_cell_range_iterator_at_u32_edge() {
        let corner = CellAddress::new(u32::MAX, u32::MAX);
        let cells: Vec<_> = CellRange::single(corner).cells().collect();
        assert_eq!(cells, vec![corner]);
    }
}
