//! Tests for opening workbooks and rejecting broken packages.

use crate::FixtureBuilder;
use slim_sheets_xlsx::{XlsxError, XlsxWorkbook};
use std::io::Cursor;

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ThisFileDoesntExist.xlsx");

    match XlsxWorkbook::open(&path) {
        Err(XlsxError::NotFound(p)) => assert_eq!(p, path),
        other => panic!("expected NotFound, got {:?}", other.err()),
    }
}

#[test]
fn test_open_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = FixtureBuilder::new()
        .shared_string("hello")
        .sheet("Sheet1", r#"<row r="1"><c r="A1" t="s"><v>0</v></c></row>"#)
        .write_to(dir.path(), "book.xlsx");

    let mut workbook = XlsxWorkbook::open(&path).unwrap();
    let sheet = workbook.resolve_sheet(None).unwrap();
    assert_eq!(workbook.get_value(&sheet, 1, 1).as_deref(), Some("hello"));
}

#[test]
fn test_not_a_zip_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.xlsx");
    std::fs::write(&path, "this is not a spreadsheet").unwrap();

    assert!(matches!(
        XlsxWorkbook::open(&path),
        Err(XlsxError::Corrupt(_))
    ));
}

#[test]
fn test_missing_content_types_is_corrupt() {
    let bytes = FixtureBuilder::new()
        .sheet("Sheet1", "")
        .without_content_types()
        .build();

    assert!(matches!(
        XlsxWorkbook::from_reader(Cursor::new(bytes)),
        Err(XlsxError::Corrupt(_))
    ));
}

#[test]
fn test_missing_workbook_part_is_corrupt() {
    use std::io::Write;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buf);
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(b"<Types/>").unwrap();
        zip.finish().unwrap();
    }

    assert!(matches!(
        XlsxWorkbook::from_reader(Cursor::new(buf.into_inner())),
        Err(XlsxError::Corrupt(_))
    ));
}

#[test]
fn test_into_inner_returns_stream() {
    let bytes = FixtureBuilder::new().sheet("Sheet1", "").build();
    let len = bytes.len();

    let workbook = XlsxWorkbook::from_reader(Cursor::new(bytes)).unwrap();
    assert_eq!(workbook.into_inner().into_inner().len(), len);
}
