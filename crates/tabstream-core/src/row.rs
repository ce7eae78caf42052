//! Row types

use crate::cell::{reference, Cell, CellAccess, CellCollection, CellValue};
use crate::error::Result;

static EMPTY_ROW: Row = Row {
    cells: CellCollection::new(),
    hidden: false,
};

/// One row produced by a row source: an ordered, fixed-length set of cells
/// plus a hidden flag
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: CellCollection,
    hidden: bool,
}

impl Row {
    /// Create a visible row from its cells
    pub fn new<C: Into<CellCollection>>(cells: C) -> Self {
        Self {
            cells: cells.into(),
            hidden: false,
        }
    }

    /// Create a row from raw values
    ///
    /// ```
    /// use tabstream_core::{CellAccess, Row};
    ///
    /// let row = Row::from_values(["id", "name"]);
    /// assert_eq!(row.cell(1).get_string().unwrap(), "name");
    /// ```
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        Self::new(values.into_iter().map(Cell::new).collect::<CellCollection>())
    }

    /// Set the hidden flag
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// The shared empty row returned for rows past the end of the data
    pub fn empty() -> &'static Row {
        &EMPTY_ROW
    }

    /// The row's cells
    pub fn cells(&self) -> &CellCollection {
        &self.cells
    }

    /// Get the cell at a column index (empty cell past the end)
    pub fn cell(&self, col: u32) -> &Cell {
        self.cells.get(col)
    }

    /// Get the cell for column letters (e.g. "B")
    pub fn cell_by_reference(&self, reference: &str) -> Result<&Cell> {
        self.cells.by_reference(reference)
    }

    /// Number of stored cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row stores no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row is hidden
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// True if every cell is blank; stops at the first non-blank cell
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellAccess::is_blank)
    }

    /// Clone the cells in `first..=last`, padding with empty cells past the end
    pub(crate) fn slice_cells(&self, first: u32, last: u32) -> Vec<Cell> {
        (first..=last).map(|c| self.cell(c).clone()).collect()
    }

    /// Iterate `(column reference, cell)` pairs, mostly for display
    pub fn labelled_cells(&self) -> impl Iterator<Item = (String, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (reference::column_reference(i as u32), cell))
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Row::new(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_row_sentinel() {
        let row = Row::empty();
        assert!(std::ptr::eq(row, Row::empty()));
        assert_eq!(row.len(), 0);
        assert!(!row.is_hidden());
        assert!(row.is_blank());
        assert!(row.cell(10).value().is_empty());
    }

    #[test]
    fn test_row_is_blank() {
        assert!(Row::from_values([CellValue::Empty, CellValue::string("")]).is_blank());
        assert!(!Row::from_values([CellValue::Empty, CellValue::from(0)]).is_blank());
        assert!(Row::new(CellCollection::new()).is_blank());
    }

    #[test]
    fn test_row_cells() {
        let row = Row::from_values([1, 2, 3]).with_hidden(true);
        assert!(row.is_hidden());
        assert_eq!(row.cell(2).get_i32().unwrap(), 3);
        assert_eq!(row.cell_by_reference("A").unwrap().get_i32().unwrap(), 1);
        assert!(row.cell_by_reference("D").unwrap().is_blank());
        assert!(row.cell_by_reference("A1").is_err());
    }

    #[test]
    fn test_slice_cells_pads() {
        let row = Row::from_values(["a", "b"]);
        let cells = row.slice_cells(1, 3);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].get_string().unwrap(), "b");
        assert!(cells[1].is_blank());
        assert!(cells[2].is_blank());
    }

    #[test]
    fn test_labelled_cells() {
        let row = Row::from_values(["x", "y"]);
        let labels: Vec<String> = row.labelled_cells().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["A".to_string(), "B".to_string()]);
    }
}
