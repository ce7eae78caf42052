//! Bounds-safe cell collection

use std::ops::Index;

use crate::cell::{reference, Cell};
use crate::error::Result;

/// The fixed-length, ordered cells of one row
///
/// Indexing past the stored length yields [`Cell::empty`] instead of
/// panicking, so a short row reads like one padded with empty cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellCollection {
    cells: Vec<Cell>,
}

impl CellCollection {
    /// An empty collection
    pub const fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Number of stored cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cells are stored
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get the cell at a column index, or the empty cell past the end
    pub fn get(&self, col: u32) -> &Cell {
        usize::try_from(col)
            .ok()
            .and_then(|i| self.cells.get(i))
            .unwrap_or_else(|| Cell::empty())
    }

    /// Get the cell for column letters (e.g. "C")
    pub fn by_reference(&self, reference: &str) -> Result<&Cell> {
        Ok(self.get(reference::column_index(reference)?))
    }

    /// Iterate over the stored cells
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Borrow the stored cells as a slice
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }
}

impl Index<u32> for CellCollection {
    type Output = Cell;

    fn index(&self, col: u32) -> &Cell {
        self.get(col)
    }
}

impl From<Vec<Cell>> for CellCollection {
    fn from(cells: Vec<Cell>) -> Self {
        Self { cells }
    }
}

impl FromIterator<Cell> for CellCollection {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CellCollection {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl IntoIterator for CellCollection {
    type Item = Cell;
    type IntoIter = std::vec::IntoIter<Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}
