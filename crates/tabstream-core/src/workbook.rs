//! Workbook and worksheet collection types

use std::fmt;

use crate::error::{Error, Result};
use crate::source::{AsyncRowSource, BlockingRowSource, RowSource};
use crate::worksheet::Worksheet;

/// The ordered worksheets of a workbook
///
/// Unlike row and cell lookups, a worksheet index or name that does not
/// exist is an error: the set of sheets is fixed and known up front.
pub struct WorksheetCollection<S: RowSource> {
    sheets: Vec<Worksheet<S>>,
}

impl<S: RowSource> WorksheetCollection<S> {
    /// Create an empty collection
    pub fn new() -> Self {
        Self { sheets: Vec::new() }
    }

    /// Get the number of worksheets
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Check if there are no worksheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Append a worksheet, returning its index
    pub fn push(&mut self, sheet: Worksheet<S>) -> usize {
        self.sheets.push(sheet);
        self.sheets.len() - 1
    }

    /// Get a worksheet by index
    pub fn get(&self, index: usize) -> Result<&Worksheet<S>> {
        let count = self.sheets.len();
        self.sheets
            .get(index)
            .ok_or(Error::SheetOutOfBounds(index, count))
    }

    /// Get a mutable worksheet by index
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Worksheet<S>> {
        let count = self.sheets.len();
        self.sheets
            .get_mut(index)
            .ok_or(Error::SheetOutOfBounds(index, count))
    }

    /// Get the index of the first worksheet with exactly this name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|s| s.name() == name)
    }

    /// Get a worksheet by exact (case-sensitive) name
    pub fn by_name(&self, name: &str) -> Result<&Worksheet<S>> {
        self.sheets
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// Get a mutable worksheet by exact (case-sensitive) name
    pub fn by_name_mut(&mut self, name: &str) -> Result<&mut Worksheet<S>> {
        self.sheets
            .iter_mut()
            .find(|s| s.name() == name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// Worksheet names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|s| s.name())
    }

    /// Iterate over all worksheets
    pub fn iter(&self) -> std::slice::Iter<'_, Worksheet<S>> {
        self.sheets.iter()
    }

    /// Iterate over all worksheets mutably
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Worksheet<S>> {
        self.sheets.iter_mut()
    }
}

impl<S: RowSource> Default for WorksheetCollection<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RowSource> From<Vec<Worksheet<S>>> for WorksheetCollection<S> {
    fn from(sheets: Vec<Worksheet<S>>) -> Self {
        Self { sheets }
    }
}

impl<S: RowSource> FromIterator<Worksheet<S>> for WorksheetCollection<S> {
    fn from_iter<I: IntoIterator<Item = Worksheet<S>>>(iter: I) -> Self {
        Self {
            sheets: iter.into_iter().collect(),
        }
    }
}

impl<'a, S: RowSource> IntoIterator for &'a WorksheetCollection<S> {
    type Item = &'a Worksheet<S>;
    type IntoIter = std::slice::Iter<'a, Worksheet<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sheets.iter()
    }
}

impl<S: RowSource> fmt::Debug for WorksheetCollection<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.sheets.iter()).finish()
    }
}

/// A workbook: an ordered collection of worksheets
///
/// # Example
/// ```
/// use tabstream_core::{CellAccess, MemorySource, Row, Workbook, Worksheet};
///
/// let mut wb = Workbook::new();
/// wb.add_worksheet(Worksheet::new("Sheet1", MemorySource::new(vec![Row::from_values([42])])));
///
/// let sheet = wb.worksheets_mut().by_name_mut("Sheet1").unwrap();
/// assert_eq!(sheet.cell("A1").unwrap().get_i64().unwrap(), 42);
/// wb.close().unwrap();
/// ```
pub struct Workbook<S: RowSource> {
    worksheets: WorksheetCollection<S>,
}

impl<S: RowSource> Workbook<S> {
    /// Create a workbook with no worksheets
    pub fn new() -> Self {
        Self {
            worksheets: WorksheetCollection::new(),
        }
    }

    /// Create a workbook from worksheets
    pub fn from_worksheets<I: IntoIterator<Item = Worksheet<S>>>(sheets: I) -> Self {
        Self {
            worksheets: sheets.into_iter().collect(),
        }
    }

    /// Add a worksheet, returning its index
    pub fn add_worksheet(&mut self, sheet: Worksheet<S>) -> usize {
        self.worksheets.push(sheet)
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// The worksheet collection
    pub fn worksheets(&self) -> &WorksheetCollection<S> {
        &self.worksheets
    }

    /// The worksheet collection, mutably
    pub fn worksheets_mut(&mut self) -> &mut WorksheetCollection<S> {
        &mut self.worksheets
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Result<&mut Worksheet<S>> {
        self.worksheets.get_mut(index)
    }

    /// Get a mutable worksheet by name
    pub fn worksheet_by_name_mut(&mut self, name: &str) -> Result<&mut Worksheet<S>> {
        self.worksheets.by_name_mut(name)
    }
}

impl<S: BlockingRowSource> Workbook<S> {
    /// Release every worksheet's session in order
    ///
    /// Every worksheet is attempted; the first failure is returned.
    /// Idempotent.
    pub fn close(&mut self) -> Result<()> {
        let mut first = None;
        for sheet in self.worksheets.iter_mut() {
            if let Err(e) = sheet.close() {
                tracing::warn!("Failed to close worksheet '{}': {e}", sheet.name());
                first.get_or_insert(e);
            }
        }
        first.map_or(Ok(()), Err)
    }
}

impl<S: AsyncRowSource> Workbook<S> {
    /// Release every worksheet's session in order from a suspending context
    pub async fn close_async(&mut self) -> Result<()> {
        let mut first = None;
        for sheet in self.worksheets.iter_mut() {
            if let Err(e) = sheet.close_async().await {
                tracing::warn!("Failed to close worksheet '{}': {e}", sheet.name());
                first.get_or_insert(e);
            }
        }
        first.map_or(Ok(()), Err)
    }
}

impl<S: RowSource> Default for Workbook<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RowSource> fmt::Debug for Workbook<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workbook")
            .field("worksheets", &self.worksheets)
            .finish()
    }
}
