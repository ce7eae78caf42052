//! CSV row source

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tabstream_core::{BlockingRowSource, Cell, CellValue, Result, Row, RowSource, Worksheet};

use crate::detect::detect_type;
use crate::error::CsvError;
use crate::options::CsvReadOptions;

#[derive(Debug, Clone)]
enum Input {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

/// A forward-only row source over CSV text
///
/// Every session re-reads the input from the start, so a worksheet over a
/// `CsvSource` can rewind by restarting.
///
/// ```
/// use tabstream_core::CellAccess;
/// use tabstream_csv::{CsvReadOptions, CsvSource};
///
/// let source = CsvSource::from_bytes("name,qty\nbolt,12\n", CsvReadOptions::default());
/// let mut sheet = source.into_worksheet("Stock");
/// assert_eq!(sheet.cell("B2").unwrap().get_i32().unwrap(), 12);
/// assert_eq!(sheet.cell("B1").unwrap().get_string().unwrap(), "qty");
/// ```
#[derive(Debug, Clone)]
pub struct CsvSource {
    input: Input,
    options: CsvReadOptions,
}

/// One pass over a [`CsvSource`]
pub struct CsvSession {
    reader: csv::Reader<Box<dyn Read + Send>>,
    record: csv::StringRecord,
    records_read: u64,
}

impl CsvSource {
    /// Read from a file; the file is opened anew for every session
    pub fn from_path<P: AsRef<Path>>(path: P, options: CsvReadOptions) -> Self {
        Self {
            input: Input::Path(path.as_ref().to_path_buf()),
            options,
        }
    }

    /// Read from bytes held in memory
    pub fn from_bytes<B: AsRef<[u8]>>(bytes: B, options: CsvReadOptions) -> Self {
        Self {
            input: Input::Bytes(Arc::from(bytes.as_ref())),
            options,
        }
    }

    /// Reading options
    pub fn options(&self) -> &CsvReadOptions {
        &self.options
    }

    /// The backing file, if reading from one
    pub fn path(&self) -> Option<&Path> {
        match &self.input {
            Input::Path(p) => Some(p),
            Input::Bytes(_) => None,
        }
    }

    /// Wrap this source in a worksheet
    pub fn into_worksheet<N: Into<String>>(self, name: N) -> Worksheet<Self> {
        Worksheet::new(name, self)
    }

    fn reader(&self) -> std::result::Result<Box<dyn Read + Send>, CsvError> {
        Ok(match &self.input {
            Input::Path(path) => Box::new(File::open(path)?),
            Input::Bytes(bytes) => Box::new(Cursor::new(Arc::clone(bytes))),
        })
    }

    fn to_row(&self, record: &csv::StringRecord, is_header: bool) -> Row {
        let detect = self.options.auto_detect_types && !is_header;
        record
            .iter()
            .map(|field| {
                if detect {
                    Cell::new(detect_type(field))
                } else if field.is_empty() {
                    Cell::new(CellValue::Empty)
                } else {
                    Cell::new(field)
                }
            })
            .collect::<Vec<_>>()
            .into()
    }
}

impl RowSource for CsvSource {
    type Session = CsvSession;
}

impl BlockingRowSource for CsvSource {
    fn open(&self) -> Result<CsvSession> {
        let trim = if self.options.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        };
        let reader = csv::ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .has_headers(false)
            .flexible(true)
            .trim(trim)
            .from_reader(self.reader()?);
        tracing::debug!("Opened CSV session over {:?}", self.path());
        Ok(CsvSession {
            reader,
            record: csv::StringRecord::new(),
            records_read: 0,
        })
    }

    fn next_row(&self, session: &mut CsvSession) -> Result<Option<Row>> {
        let more = session
            .reader
            .read_record(&mut session.record)
            .map_err(CsvError::from)?;
        if !more {
            return Ok(None);
        }
        let is_header = self.options.has_header && session.records_read == 0;
        session.records_read += 1;
        Ok(Some(self.to_row(&session.record, is_header)))
    }

    fn release(&self, session: CsvSession) -> Result<()> {
        tracing::trace!("Released CSV session after {} records", session.records_read);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tabstream_core::CellAccess;

    fn read_all(source: &CsvSource) -> Vec<Row> {
        let mut session = source.open().unwrap();
        let mut rows = Vec::new();
        while let Some(row) = source.next_row(&mut session).unwrap() {
            rows.push(row);
        }
        source.release(session).unwrap();
        rows
    }

    #[test]
    fn test_header_stays_text() {
        let source = CsvSource::from_bytes("1,true\n2,false\n", CsvReadOptions::default());
        let rows = read_all(&source);
        assert_eq!(rows[0].cell(0).value(), &CellValue::string("1"));
        assert_eq!(rows[1].cell(0).value(), &CellValue::Int64(2));
        assert_eq!(rows[1].cell(1).value(), &CellValue::Boolean(false));
    }

    #[test]
    fn test_no_detection() {
        let options = CsvReadOptions {
            has_header: false,
            auto_detect_types: false,
            ..Default::default()
        };
        let rows = read_all(&CsvSource::from_bytes("5,,x\n", options));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cell(0).value(), &CellValue::string("5"));
        assert!(rows[0].cell(1).value().is_empty());
    }

    #[test]
    fn test_ragged_rows() {
        let options = CsvReadOptions {
            has_header: false,
            ..Default::default()
        };
        let rows = read_all(&CsvSource::from_bytes("1\n1,2,3\n4,5\n", options));
        let lens: Vec<usize> = rows.iter().map(|r| r.len()).collect();
        assert_eq!(lens, vec![1, 3, 2]);
    }

    #[test]
    fn test_tsv_and_trim() {
        let options = CsvReadOptions {
            has_header: false,
            trim: true,
            ..CsvReadOptions::tsv()
        };
        let rows = read_all(&CsvSource::from_bytes(" a \t 2 \n", options));
        assert_eq!(rows[0].cell(0).get_string().unwrap(), "a");
        assert_eq!(rows[0].cell(1).get_i64().unwrap(), 2);
    }

    #[test]
    fn test_sessions_restart() {
        let source = CsvSource::from_bytes("h\n1\n2\n", CsvReadOptions::default());
        assert_eq!(read_all(&source).len(), 3);
        assert_eq!(read_all(&source).len(), 3);
    }

    #[test]
    fn test_missing_file() {
        let source = CsvSource::from_path("/definitely/not/here.csv", CsvReadOptions::default());
        let err = source.open().err().unwrap();
        assert!(matches!(err, tabstream_core::Error::Io(_)));
    }
}
