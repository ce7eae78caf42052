//! # tabstream
//!
//! Random, index-based access to spreadsheet rows backed by sources that
//! can only be read forward, once, in order.
//!
//! ## Features
//!
//! - A1-style reference codec (`"AA10"` ↔ `(9, 26)`)
//! - Tagged cell values with strict and `_or_none` typed getters
//! - Bounds-safe row and cell lookups that fall back to shared empty sentinels
//! - A streaming row cursor that restarts its source on backward jumps
//! - Blocking and async entry points with cooperative cancellation
//! - CSV row source and writer (feature `csv`, on by default)
//!
//! ## Example
//!
//! ```rust
//! use tabstream::prelude::*;
//!
//! let source = CsvSource::from_bytes("item,qty\nbolt,12\nnut,30\n", CsvReadOptions::default());
//! let mut workbook = Workbook::from_worksheets([source.into_worksheet("Stock")]);
//!
//! let sheet = workbook.worksheets_mut().by_name_mut("Stock").unwrap();
//! assert_eq!(sheet.cell("B3").unwrap().get_i32().unwrap(), 30);
//! assert_eq!(sheet.cell("B2").unwrap().get_u8_or_none(), Some(12));
//! assert!(sheet.cell("B9").unwrap().is_blank());
//!
//! workbook.close().unwrap();
//! ```

pub mod prelude;

// Re-export core types
pub use tabstream_core::{
    cell::reference,
    AsyncRowSource,
    AsyncRows,
    BlockingRowSource,
    Cancellation,
    // Cell types
    Cell,
    CellAccess,
    CellAddress,
    CellCollection,
    CellRange,
    CellValue,
    // Error types
    ConversionError,
    ConversionFailure,
    CursorState,
    Error,
    ErrorKind,
    FromCellValue,
    MemorySource,
    Result,
    Row,
    // Cursor and sources
    RowCursor,
    RowSource,
    Rows,
    // Main types
    Workbook,
    Worksheet,
    WorksheetCollection,
};

// Re-export I/O types
#[cfg(feature = "csv")]
pub use tabstream_csv::{
    CsvError, CsvReadOptions, CsvSource, CsvWriteOptions, CsvWriter, LineTerminator,
};

#[cfg(feature = "csv")]
use std::path::Path;

/// Extension trait for Workbook to add file I/O
#[cfg(feature = "csv")]
pub trait WorkbookExt: Sized {
    /// Open a workbook from a file
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;

    /// Save the first worksheet to a file
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

#[cfg(feature = "csv")]
impl WorkbookExt for Workbook<CsvSource> {
    fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let options = match extension.as_deref() {
            Some("csv") | Some("txt") => CsvReadOptions::default(),
            Some("tsv") | Some("tab") => CsvReadOptions::tsv(),
            _ => {
                return Err(Error::from_source(format!(
                    "Unsupported file format: {}",
                    path.display()
                )))
            }
        };
        if !path.is_file() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("No such file: {}", path.display()),
            )));
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Sheet1".to_string());
        let sheet = CsvSource::from_path(path, options).into_worksheet(name);
        Ok(Workbook::from_worksheets([sheet]))
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let sheet = self.worksheets().get(0)?;
        CsvWriter::write_file(sheet, path, &CsvWriteOptions::default())?;
        Ok(())
    }
}
