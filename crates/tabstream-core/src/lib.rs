//! # tabstream-core
//!
//! Core access layer for tabular spreadsheet data.
//!
//! This crate provides:
//! - [`cell::reference`] - Conversion between zero-based indices and A1-style references
//! - [`CellValue`], [`Cell`] and [`CellAccess`] - Tagged cell values with strict and
//!   failure-tolerant typed getters
//! - [`CellCollection`] and [`Row`] - Bounds-safe indexed lookups that fall back to
//!   shared empty sentinels
//! - [`RowCursor`] - Random access over a forward-only [`RowSource`]
//! - [`Workbook`], [`WorksheetCollection`], [`Worksheet`] - Composition of the above
//!
//! Row sources are pluggable: implement [`BlockingRowSource`] and/or
//! [`AsyncRowSource`] for a format reader and hand it to a [`Worksheet`].
//!
//! ## Example
//!
//! ```rust
//! use tabstream_core::{CellAccess, MemorySource, Row, Worksheet};
//!
//! let source = MemorySource::new(vec![
//!     Row::from_values(["name", "qty"]),
//!     Row::from_values(["bolts", "12"]),
//! ]);
//! let mut sheet = Worksheet::new("Stock", source);
//!
//! assert_eq!(sheet.cell("B2").unwrap().get_u32().unwrap(), 12);
//! assert!(sheet.cell("B9").unwrap().is_blank());
//! assert_eq!(sheet.cell("A9").unwrap().get_i32_or_none(), None);
//! sheet.close().unwrap();
//! ```

pub mod cell;
pub mod cursor;
pub mod error;
pub mod row;
pub mod source;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{
    Cell, CellAccess, CellAddress, CellCollection, CellRange, CellRangeIterator, CellValue,
    FromCellValue,
};
pub use cursor::{Cancellation, CursorState, RowCursor};
pub use error::{ConversionError, ConversionFailure, Error, ErrorKind, Result};
pub use row::Row;
pub use source::{AsyncRowSource, BlockingRowSource, MemorySession, MemorySource, RowSource};
pub use workbook::{Workbook, WorksheetCollection};
pub use worksheet::{AsyncRows, Rows, Worksheet};
