//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tabstream_core::{BlockingRowSource, CellAccess, Worksheet};

use crate::error::CsvResult;
use crate::options::CsvWriteOptions;

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a worksheet to a CSV file, returning the number of rows written
    pub fn write_file<S, P>(
        worksheet: &Worksheet<S>,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<u64>
    where
        S: BlockingRowSource,
        P: AsRef<Path>,
    {
        let file = File::create(path)?;
        Self::write(worksheet, file, options)
    }

    /// Write a worksheet to a writer, returning the number of rows written
    ///
    /// Rows are read with a full traversal, so the worksheet's cursor is
    /// left where it was. Each cell is written in its display form.
    pub fn write<S, W>(
        worksheet: &Worksheet<S>,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<u64>
    where
        S: BlockingRowSource,
        W: Write,
    {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(options.line_terminator.to_csv())
            .flexible(true)
            .from_writer(writer);

        let mut written = 0u64;
        for row in worksheet.rows() {
            let row = row?;
            let record: Vec<String> = row.cells().iter().map(|c| c.value().to_string()).collect();
            csv_writer.write_record(&record)?;
            written += 1;
        }

        csv_writer.flush()?;
        tracing::debug!("Wrote {written} rows from worksheet '{}'", worksheet.name());
        Ok(written)
    }
}
