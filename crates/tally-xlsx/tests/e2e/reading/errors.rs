//! Fatal decode errors.

use crate::{render_grid, survey_grid, write_file, zip_parts, Cell};
use tally_xlsx::{WorkbookReader, XlsxError, SHARED_STRINGS_PART, WORKSHEET_PART};

#[test]
fn test_missing_worksheet() {
    let (shared, _) = render_grid(&[vec![Cell::Text("x")]]);
    let bytes = zip_parts(&[(SHARED_STRINGS_PART, &shared)]);

    match WorkbookReader::read(&bytes) {
        Err(XlsxError::MissingEntry(name)) => assert_eq!(name, WORKSHEET_PART),
        other => panic!("expected MissingEntry, got {other:?}"),
    }
}

#[test]
fn test_shared_string_index_out_of_range() {
    let shared = r#"<sst><si><t>a</t></si><si><t>b</t></si></sst>"#;
    let sheet = r#"<worksheet><sheetData><row r="1"><c r="A1" t="s"><v>2</v></c></row></sheetData></worksheet>"#;
    let bytes = zip_parts(&[(SHARED_STRINGS_PART, shared), (WORKSHEET_PART, sheet)]);

    match WorkbookReader::read(&bytes) {
        Err(XlsxError::InvalidSharedStringIndex { index, len }) => {
            assert_eq!(index, "2");
            assert_eq!(len, 2);
        }
        other => panic!("expected InvalidSharedStringIndex, got {other:?}"),
    }
}

#[test]
fn test_malformed_worksheet() {
    let (shared, _) = render_grid(&survey_grid(&["Q1"], &["q"], &[]));
    let sheet = r#"<worksheet><sheetData><row r="1"><c r="A1"><v>1</v></row></sheetData></worksheet>"#;
    let bytes = zip_parts(&[(SHARED_STRINGS_PART, &shared), (WORKSHEET_PART, sheet)]);

    assert!(matches!(
        WorkbookReader::read(&bytes),
        Err(XlsxError::MalformedMarkup(_))
    ));
}

#[test]
fn test_malformed_shared_strings() {
    let sheet = r#"<worksheet><sheetData/></worksheet>"#;
    let bytes = zip_parts(&[(SHARED_STRINGS_PART, "<si>no root</si>"), (WORKSHEET_PART, sheet)]);

    assert!(matches!(
        WorkbookReader::read(&bytes),
        Err(XlsxError::MalformedMarkup(_))
    ));
}

#[test]
fn test_not_a_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "notes.xlsx", b"this is a text file");

    assert!(matches!(
        WorkbookReader::read_file(&path),
        Err(XlsxError::CorruptArchive(_))
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.xlsx");

    assert!(matches!(
        WorkbookReader::read_file(&path),
        Err(XlsxError::Io(_))
    ));
}

#[test]
fn test_one_bad_file_aborts_read_files() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_file(
        dir.path(),
        "a.xlsx",
        &crate::workbook_from_grid(&survey_grid(&["Q1"], &["q"], &[vec![Cell::Text("x")]])),
    );
    let bad = write_file(dir.path(), "b.xlsx", b"PK\x03\x04 truncated");

    assert!(WorkbookReader::read_files(&[good, bad]).is_err());
}
