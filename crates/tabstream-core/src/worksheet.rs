//! Worksheet type

use std::fmt;
use std::iter::FusedIterator;

use crate::cell::{reference, Cell, CellRange};
use crate::cursor::{Cancellation, CursorState, RowCursor};
use crate::error::Result;
use crate::row::Row;
use crate::source::{AsyncRowSource, BlockingRowSource, RowSource};

/// A named sheet whose rows come from a forward-only source
///
/// Indexed access (`row_at`, `cell_at`, ...) goes through one [`RowCursor`]
/// and needs `&mut self`. Full traversal (`rows`, `rows_async`) opens its own
/// session and only borrows `&self`, so the two paths cannot be driven at
/// the same time on one worksheet.
pub struct Worksheet<S: RowSource> {
    name: String,
    source: S,
    cursor: RowCursor<S>,
}

impl<S: RowSource> Worksheet<S> {
    /// Create a worksheet over a row source
    pub fn new<N: Into<String>>(name: N, source: S) -> Self {
        Self {
            name: name.into(),
            source,
            cursor: RowCursor::new(),
        }
    }

    /// Get the worksheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the worksheet name
    pub fn set_name<N: Into<String>>(&mut self, name: N) {
        self.name = name.into();
    }

    /// The underlying row source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The cursor serving indexed access
    pub fn cursor(&self) -> &RowCursor<S> {
        &self.cursor
    }

    /// Shorthand for `cursor().state()`
    pub fn cursor_state(&self) -> CursorState {
        self.cursor.state()
    }
}

impl<S: BlockingRowSource> Worksheet<S> {
    /// Get a row by zero-based index ([`Row::empty`] past the end)
    pub fn row_at(&mut self, index: u32) -> Result<&Row> {
        self.cursor.get(&self.source, index)
    }

    /// Like [`row_at`](Self::row_at), checking `cancel` before every pull
    pub fn row_at_with_cancel(&mut self, index: u32, cancel: &Cancellation) -> Result<&Row> {
        self.cursor.get_with_cancel(&self.source, index, cancel)
    }

    /// Get a row by its 1-based reference (e.g. "3")
    pub fn row(&mut self, reference: &str) -> Result<&Row> {
        let index = reference::row_index(reference)?;
        self.row_at(index)
    }

    /// Get a cell by zero-based row and column
    pub fn cell_at(&mut self, row: u32, col: u32) -> Result<&Cell> {
        Ok(self.row_at(row)?.cell(col))
    }

    /// Get a cell by A1-style reference (e.g. "B3")
    pub fn cell(&mut self, reference: &str) -> Result<&Cell> {
        let (row, col) = reference::cell_index(reference)?;
        self.cell_at(row, col)
    }

    /// Read a rectangular block (e.g. "A1:C10") top to bottom
    ///
    /// Returns one `Vec<Cell>` per row, each exactly as wide as the range.
    /// Reading stops where the data ends, so a range reaching past the last
    /// row yields fewer rows than it names.
    pub fn range_values(&mut self, reference: &str) -> Result<Vec<Vec<Cell>>> {
        let range = CellRange::parse(reference)?;
        let (first, last) = (range.start.col, range.end.col);
        let mut block = Vec::new();
        for r in range.start.row..=range.end.row {
            if self.row_at(r)?.is_empty() && self.past_end(r) {
                tracing::debug!("Range {reference} ends at the data after {} rows", block.len());
                break;
            }
            block.push(self.row_at(r)?.slice_cells(first, last));
        }
        Ok(block)
    }

    fn past_end(&self, index: u32) -> bool {
        self.cursor_state() == CursorState::Exhausted
            && self.cursor.position().map_or(true, |p| index > p)
    }

    /// Traverse every row from the top with a fresh session
    ///
    /// ```
    /// use tabstream_core::{MemorySource, Row, Worksheet};
    ///
    /// let sheet = Worksheet::new("data", MemorySource::new(vec![Row::from_values([1]); 3]));
    /// let count = sheet.rows().filter_map(|r| r.ok()).count();
    /// assert_eq!(count, 3);
    /// ```
    pub fn rows(&self) -> Rows<'_, S> {
        Rows {
            source: &self.source,
            session: None,
            done: false,
        }
    }

    /// Release the cursor's session. Idempotent.
    pub fn close(&mut self) -> Result<()> {
        self.cursor.release(&self.source)
    }
}

impl<S: AsyncRowSource> Worksheet<S> {
    /// Get a row by zero-based index from a suspending source
    pub async fn row_at_async(&mut self, index: u32) -> Result<&Row> {
        self.cursor.get_async(&self.source, index).await
    }

    /// Like [`row_at_async`](Self::row_at_async), checking `cancel` before every pull
    pub async fn row_at_async_with_cancel(
        &mut self,
        index: u32,
        cancel: &Cancellation,
    ) -> Result<&Row> {
        self.cursor
            .get_async_with_cancel(&self.source, index, cancel)
            .await
    }

    /// Get a row by its 1-based reference
    pub async fn row_async(&mut self, reference: &str) -> Result<&Row> {
        let index = reference::row_index(reference)?;
        self.row_at_async(index).await
    }

    /// Get a cell by zero-based row and column
    pub async fn cell_at_async(&mut self, row: u32, col: u32) -> Result<&Cell> {
        Ok(self.row_at_async(row).await?.cell(col))
    }

    /// Get a cell by A1-style reference
    pub async fn cell_async(&mut self, reference: &str) -> Result<&Cell> {
        let (row, col) = reference::cell_index(reference)?;
        self.cell_at_async(row, col).await
    }

    /// Traverse every row from the top with a fresh suspending session
    pub fn rows_async(&self) -> AsyncRows<'_, S> {
        AsyncRows {
            source: &self.source,
            session: None,
            done: false,
        }
    }

    /// Release the cursor's session. Idempotent.
    pub async fn close_async(&mut self) -> Result<()> {
        self.cursor.release_async(&self.source).await
    }
}

impl<S: RowSource> fmt::Debug for Worksheet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worksheet")
            .field("name", &self.name)
            .field("cursor", &self.cursor)
            .finish()
    }
}

/// Blocking full traversal returned by [`Worksheet::rows`]
///
/// The session opens on the first call to `next` and is released when the
/// data ends, on the first error, on [`close`](Rows::close), or on drop.
pub struct Rows<'a, S: BlockingRowSource> {
    source: &'a S,
    session: Option<S::Session>,
    done: bool,
}

impl<S: BlockingRowSource> Rows<'_, S> {
    fn finish(&mut self) -> Result<()> {
        self.done = true;
        match self.session.take() {
            Some(session) => self.source.release(session),
            None => Ok(()),
        }
    }

    /// Stop early, releasing the session and reporting release failures
    pub fn close(mut self) -> Result<()> {
        self.finish()
    }
}

impl<S: BlockingRowSource> Iterator for Rows<'_, S> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Result<Row>> {
        if self.done {
            return None;
        }
        if self.session.is_none() {
            match self.source.open() {
                Ok(session) => self.session = Some(session),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        let session = self.session.as_mut()?;
        match self.source.next_row(session) {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => self.finish().err().map(Err),
            Err(e) => {
                if let Err(release) = self.finish() {
                    tracing::warn!("Failed to release row session after error: {release}");
                }
                Some(Err(e))
            }
        }
    }
}

impl<S: BlockingRowSource> FusedIterator for Rows<'_, S> {}

impl<S: BlockingRowSource> Drop for Rows<'_, S> {
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            tracing::warn!("Failed to release row session on drop: {e}");
        }
    }
}

/// Suspending full traversal returned by [`Worksheet::rows_async`]
pub struct AsyncRows<'a, S: AsyncRowSource> {
    source: &'a S,
    session: Option<S::Session>,
    done: bool,
}

impl<S: AsyncRowSource> AsyncRows<'_, S> {
    /// Pull the next row, or `None` once the data ends
    pub async fn next_row(&mut self) -> Result<Option<Row>> {
        if self.done {
            return Ok(None);
        }
        if self.session.is_none() {
            let opened = self.source.open_async().await;
            match opened {
                Ok(session) => self.session = Some(session),
                Err(e) => {
                    self.done = true;
                    return Err(e);
                }
            }
        }
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        match self.source.next_row_async(session).await {
            Ok(Some(row)) => Ok(Some(row)),
            Ok(None) => {
                self.finish().await?;
                Ok(None)
            }
            Err(e) => {
                if let Err(release) = self.finish().await {
                    tracing::warn!("Failed to release row session after error: {release}");
                }
                Err(e)
            }
        }
    }

    async fn finish(&mut self) -> Result<()> {
        self.done = true;
        match self.session.take() {
            Some(session) => self.source.release_async(session).await,
            None => Ok(()),
        }
    }

    /// Stop early, releasing the session
    pub async fn close(mut self) -> Result<()> {
        self.finish().await
    }
}

impl<S: AsyncRowSource> Drop for AsyncRows<'_, S> {
    fn drop(&mut self) {
        if self.session.is_some() {
            tracing::debug!("Async row traversal dropped with a live session; dropping it unreleased");
        }
    }
}
