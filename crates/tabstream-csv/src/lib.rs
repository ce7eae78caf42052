//! # tabstream-csv
//!
//! CSV row source and writer for tabstream.
//!
//! [`CsvSource`] plugs CSV text (a file or bytes in memory) into a
//! [`Worksheet`](tabstream_core::Worksheet) as a forward-only row source.
//! [`CsvWriter`] serializes a worksheet back to CSV through a full traversal.

mod detect;
mod error;
mod options;
mod source;
mod writer;

pub use detect::detect_type;
pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use source::{CsvSession, CsvSource};
pub use writer::CsvWriter;
