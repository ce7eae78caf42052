//! Prelude module - common imports for tabstream users
//!
//! ```rust
//! use tabstream::prelude::*;
//! ```

pub use crate::{
    // Source contracts
    AsyncRowSource,
    BlockingRowSource,
    // Cursor
    Cancellation,
    // Cell types
    Cell,
    CellAccess,
    CellAddress,
    CellRange,
    CellValue,
    CursorState,
    // Error types
    Error,
    ErrorKind,
    MemorySource,
    Result,
    Row,
    RowSource,
    // Main types
    Workbook,
    Worksheet,
};

#[cfg(feature = "csv")]
pub use crate::{
    // I/O types
    CsvReadOptions,
    CsvSource,
    CsvWriteOptions,
    CsvWriter,
    // Extension traits
    WorkbookExt,
};
