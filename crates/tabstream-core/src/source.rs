//! Row-source contracts
//!
//! A row source hands out forward-only pull sessions. It cannot seek, rewind
//! or report its length; the only way back to an earlier row is to release
//! the session and open a fresh one from the beginning.
//!
//! Two independent entry points are offered: [`BlockingRowSource`] for
//! synchronous callers and [`AsyncRowSource`] for sources whose pulls
//! suspend. The blocking entry point must not be driven from code already
//! running on an async executor thread.

use crate::error::Result;
use crate::row::Row;

/// Declares the session type shared by the blocking and async contracts
pub trait RowSource {
    /// One forward-only pass over the source
    type Session;
}

/// A row source pulled synchronously
pub trait BlockingRowSource: RowSource {
    /// Open a fresh session positioned before the first row
    fn open(&self) -> Result<Self::Session>;

    /// Pull the next row, or `None` once the session has no more rows
    fn next_row(&self, session: &mut Self::Session) -> Result<Option<Row>>;

    /// Release a session
    fn release(&self, session: Self::Session) -> Result<()> {
        drop(session);
        Ok(())
    }
}

/// A row source whose pulls suspend
#[allow(async_fn_in_trait)]
pub trait AsyncRowSource: RowSource {
    /// Open a fresh session positioned before the first row
    async fn open_async(&self) -> Result<Self::Session>;

    /// Pull the next row, or `None` once the session has no more rows
    async fn next_row_async(&self, session: &mut Self::Session) -> Result<Option<Row>>;

    /// Release a session
    async fn release_async(&self, session: Self::Session) -> Result<()> {
        drop(session);
        Ok(())
    }
}

/// A row source over rows already held in memory
///
/// ```
/// use tabstream_core::{BlockingRowSource, MemorySource, Row};
///
/// let source = MemorySource::new(vec![Row::from_values([1]), Row::from_values([2])]);
/// let mut session = source.open().unwrap();
/// assert!(source.next_row(&mut session).unwrap().is_some());
/// assert!(source.next_row(&mut session).unwrap().is_some());
/// assert!(source.next_row(&mut session).unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySource {
    rows: Vec<Row>,
}

/// Session over a [`MemorySource`]: the index of the next row to yield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySession {
    next: usize,
}

impl MemorySource {
    /// Create a source yielding the given rows in order
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// The rows this source yields
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    fn pull(&self, session: &mut MemorySession) -> Option<Row> {
        let row = self.rows.get(session.next)?.clone();
        session.next += 1;
        Some(row)
    }
}

impl FromIterator<Row> for MemorySource {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl RowSource for MemorySource {
    type Session = MemorySession;
}

impl BlockingRowSource for MemorySource {
    fn open(&self) -> Result<MemorySession> {
        Ok(MemorySession { next: 0 })
    }

    fn next_row(&self, session: &mut MemorySession) -> Result<Option<Row>> {
        Ok(self.pull(session))
    }
}

impl AsyncRowSource for MemorySource {
    async fn open_async(&self) -> Result<MemorySession> {
        Ok(MemorySession { next: 0 })
    }

    async fn next_row_async(&self, session: &mut MemorySession) -> Result<Option<Row>> {
        Ok(self.pull(session))
    }
}
