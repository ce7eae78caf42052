//! Tests for file-backed CSV sources and the CSV writer

use std::io::Write;

use pretty_assertions::assert_eq;
use tabstream_core::{CellAccess, CursorState, ErrorKind};
use tabstream_csv::{CsvReadOptions, CsvSource, CsvWriteOptions, CsvWriter, LineTerminator};

fn temp_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Random access over a file restarts by reopening it
#[test]
fn test_file_random_access() {
    let file = temp_csv("id,when,amount\n1,2024-01-05,9.5\n2,2024-01-06,\n3,2024-01-07,12\n");
    let mut sheet = CsvSource::from_path(file.path(), CsvReadOptions::default()).into_worksheet("t");

    assert_eq!(sheet.cell("C4").unwrap().get_i32().unwrap(), 12);
    assert!(sheet.cell("C3").unwrap().is_blank());
    assert_eq!(sheet.cursor().session_pulls(), 3);
    assert_eq!(
        sheet.cell("B2").unwrap().get_date().unwrap().to_string(),
        "2024-01-05"
    );
    assert_eq!(sheet.cell("C2").unwrap().get_f64().unwrap(), 9.5);
    assert_eq!(sheet.cursor_state(), CursorState::Positioned(1));

    assert!(sheet.row_at(10).unwrap().is_empty());
    assert_eq!(sheet.cursor_state(), CursorState::Exhausted);
    sheet.close().unwrap();
}

/// Invalid UTF-8 surfaces as a source error
#[test]
fn test_invalid_utf8_is_source_error() {
    let mut sheet = CsvSource::from_bytes(
        b"ok\n\xff\xfe\n".to_vec(),
        CsvReadOptions::default(),
    )
    .into_worksheet("bad");
    assert_eq!(sheet.cell("A1").unwrap().get_string().unwrap(), "ok");
    let err = sheet.row_at(1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Source);
}

/// A file written by the writer reads back to the same display values
#[test]
fn test_write_then_read() {
    let input = "name,qty,ok\nbolt,12,TRUE\n\"nut, hex\",3,FALSE\n";
    let sheet = CsvSource::from_bytes(input, CsvReadOptions::default()).into_worksheet("src");

    let out = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    let options = CsvWriteOptions {
        line_terminator: LineTerminator::LF,
        ..Default::default()
    };
    let written = CsvWriter::write_file(&sheet, out.path(), &options).unwrap();
    assert_eq!(written, 3);
    assert_eq!(std::fs::read_to_string(out.path()).unwrap(), input);

    let mut reread = CsvSource::from_path(out.path(), CsvReadOptions::default()).into_worksheet("copy");
    assert_eq!(reread.cell("A3").unwrap().get_string().unwrap(), "nut, hex");
    assert!(!reread.cell("C3").unwrap().get_bool().unwrap());
}
