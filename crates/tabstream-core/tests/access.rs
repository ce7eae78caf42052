//! Tests for reference-based access through the public API

use pretty_assertions::assert_eq;
use tabstream_core::cell::reference;
use tabstream_core::*;

fn inventory() -> Workbook<MemorySource> {
    let stock = MemorySource::new(vec![
        Row::from_values(["sku", "qty", "price", "checked"]),
        Row::from_values([
            CellValue::from("A-100"),
            CellValue::from(12i64),
            CellValue::from(2.5),
            CellValue::from(true),
        ]),
        Row::from_values([
            CellValue::from("A-200"),
            CellValue::Empty,
            CellValue::from("n/a"),
            CellValue::from("false"),
        ]),
    ]);
    let notes = MemorySource::new(vec![Row::from_values(["hello"])]);
    Workbook::from_worksheets([Worksheet::new("Stock", stock), Worksheet::new("Notes", notes)])
}

/// Column and cell references decode to the expected zero-based indices
#[test]
fn test_reference_examples() {
    assert_eq!(reference::column_reference(0), "A");
    assert_eq!(reference::column_reference(25), "Z");
    assert_eq!(reference::column_reference(26), "AA");
    assert_eq!(reference::column_reference(701), "ZZ");
    assert_eq!(reference::column_reference(702), "AAA");
    assert_eq!(reference::cell_index("AA10").unwrap(), (9, 26));
    assert_eq!(reference::range_index("A1:B2").unwrap(), (0, 0, 1, 1));

    let err = reference::range_index("B2:A1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

/// Typed getters through a worksheet
#[test]
fn test_typed_reads() {
    let mut wb = inventory();
    let sheet = wb.worksheet_by_name_mut("Stock").unwrap();

    assert_eq!(sheet.cell("B2").unwrap().get_u8().unwrap(), 12);
    assert_eq!(sheet.cell("C2").unwrap().get_f32().unwrap(), 2.5);
    assert!(sheet.cell("D2").unwrap().get_bool().unwrap());

    let qty = sheet.cell("B3").unwrap();
    assert!(qty.is_blank());
    assert_eq!(qty.get_string().unwrap(), "");
    assert_eq!(qty.get_i32_or_none(), None);
    assert_eq!(qty.get_i32().unwrap_err().reason, ConversionFailure::Absent);

    let price = sheet.cell("C3").unwrap();
    assert!(!price.is_blank());
    assert!(matches!(
        price.get_f64().unwrap_err().reason,
        ConversionFailure::Unparseable(_)
    ));
    assert_eq!(price.get_f64_or_none(), None);

    assert_eq!(sheet.cell("D3").unwrap().get_bool(), Ok(false));
}

/// Lookups past the data never fail, but unknown sheets do
#[test]
fn test_bounds_policy() {
    let mut wb = inventory();
    let sheet = wb.worksheet_mut(1).unwrap();
    assert!(sheet.cell("ZZ1").unwrap().is_blank());
    assert!(sheet.row("1000").unwrap().is_empty());
    assert!(!sheet.row("1000").unwrap().is_hidden());

    assert_eq!(wb.worksheet_mut(2).unwrap_err().kind(), ErrorKind::NotFound);
    assert!(matches!(
        wb.worksheet_by_name_mut("notes"),
        Err(Error::SheetNotFound(_))
    ));
    wb.close().unwrap();
}

/// Typed addresses agree with the text codec
#[test]
fn test_addresses() {
    let range: CellRange = "B2:C3".parse().unwrap();
    let cells: Vec<String> = range.cells().map(|a| a.to_string()).collect();
    assert_eq!(cells, vec!["B2", "C2", "B3", "C3"]);
    assert!(range.contains(&CellAddress::parse("C2").unwrap()));
    assert_eq!(range.to_string(), reference::range_reference(1, 1, 2, 2));
}
