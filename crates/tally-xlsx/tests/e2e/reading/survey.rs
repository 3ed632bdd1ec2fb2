//! Reading survey exports into the tabular model.

use std::collections::BTreeSet;

use crate::{survey_grid, workbook_from_grid, write_file, zip_parts, Cell};
use pretty_assertions::assert_eq;
use tally_xlsx::{Archive, WorkbookReader, SHARED_STRINGS_PART, WORKSHEET_PART};

#[test]
fn test_three_records_with_header_fields() {
    let grid = survey_grid(
        &["Q1", "Q2"],
        &["How likely?", "Why?"],
        &[
            vec![Cell::Text("Very likely"), Cell::Text("cost")],
            vec![Cell::Number("3"), Cell::Text("time")],
            vec![Cell::Text("Somewhat likely"), Cell::Absent],
        ],
    );
    let bytes = workbook_from_grid(&grid);

    let model = WorkbookReader::read(&bytes).unwrap();

    assert_eq!(model.len(), 3);
    let expected: BTreeSet<&str> = ["Q1", "Q2"].into_iter().collect();
    for record in model.records() {
        assert_eq!(record.fields().collect::<BTreeSet<_>>(), expected);
    }

    assert_eq!(model.question("Q1"), Some("How likely?"));
    assert_eq!(model.records()[1].get("Q1"), "3");
    assert_eq!(model.records()[2].get("Q2"), "");
}

#[test]
fn test_numeric_and_shared_string_cells() {
    let shared = r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="1" uniqueCount="1"><si><t>Strongly agree</t></si></sst>"#;
    let sheet = r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1"><c r="A1"><v>4.25</v></c><c r="B1" t="s"><v>0</v></c></row></sheetData></worksheet>"#;
    let bytes = zip_parts(&[(SHARED_STRINGS_PART, shared), (WORKSHEET_PART, sheet)]);

    let archive = Archive::new(&bytes).unwrap();
    assert_eq!(archive.entries().len(), 2);
    for entry in archive.entries() {
        let data = archive.read_entry(entry).unwrap();
        assert_eq!(data.len() as u64, entry.uncompressed_size);
    }

    let sheet = WorkbookReader::read_sheet(&bytes).unwrap();
    assert_eq!(sheet.shared_strings, vec!["Strongly agree".to_string()]);
    assert_eq!(sheet.rows.len(), 1);

    let values: Vec<(&str, &str)> = sheet.rows[0]
        .iter()
        .map(|(c, v)| (c.as_str(), v))
        .collect();
    assert_eq!(values, vec![("A", "4.25"), ("B", "Strongly agree")]);
}

#[test]
fn test_values_are_trimmed() {
    let grid = survey_grid(
        &[" Q1 ", "Q2"],
        &["  Question one  ", "Question two"],
        &[vec![Cell::Text("  Very likely\n"), Cell::Text("\tspaced ")]],
    );
    let model = WorkbookReader::read(&workbook_from_grid(&grid)).unwrap();

    assert_eq!(model.fields(), &["Q1".to_string(), "Q2".to_string()]);
    assert_eq!(model.question("Q1"), Some("Question one"));
    assert_eq!(model.records()[0].get("Q1"), "Very likely");
    assert_eq!(model.records()[0].get("Q2"), "spaced");
}

#[test]
fn test_columns_beyond_z_keep_order() {
    let fields: Vec<String> = (0..30).map(|i| format!("F{i}")).collect();
    let field_refs: Vec<&str> = fields.iter().map(String::as_str).collect();
    let respondent: Vec<Cell<'_>> = field_refs.iter().map(|f| Cell::Text(*f)).collect();

    let grid = survey_grid(&field_refs, &field_refs, &[respondent]);
    let model = WorkbookReader::read(&workbook_from_grid(&grid)).unwrap();

    assert_eq!(model.fields(), fields.as_slice());
    assert_eq!(model.records()[0].get("F27"), "F27");
}

#[test]
fn test_sheet_without_header_is_empty() {
    let grid = vec![vec![Cell::Text("only a title")]];
    let model = WorkbookReader::read(&workbook_from_grid(&grid)).unwrap();

    assert!(model.fields().is_empty());
    assert!(model.is_empty());
}

#[test]
fn test_workbook_without_shared_strings() {
    let sheet = r#"<worksheet><sheetData><row r="1"/><row r="2"><c r="A2"><v>7</v></c></row><row r="3"/><row r="4"/><row r="5"><c r="A5"><v>1</v></c></row></sheetData></worksheet>"#;
    let bytes = zip_parts(&[(WORKSHEET_PART, sheet)]);

    let model = WorkbookReader::read(&bytes).unwrap();
    assert_eq!(model.fields(), &["7".to_string()]);
    assert_eq!(model.records()[0].get("7"), "1");
}

#[test]
fn test_read_files_in_name_order() {
    let dir = tempfile::tempdir().unwrap();

    let first = survey_grid(
        &["ResponseId", "Q1"],
        &["Response ID", "Old wording"],
        &[vec![Cell::Text("R_a"), Cell::Text("Yes")]],
    );
    let second = survey_grid(
        &["ResponseId", "Q1", "Q2"],
        &["Response ID", "New wording", "Extra"],
        &[
            vec![Cell::Text("R_b"), Cell::Text("No"), Cell::Text("x")],
            vec![Cell::Text("R_c"), Cell::Absent, Cell::Text("y")],
        ],
    );

    let b = write_file(dir.path(), "b_wave2.xlsx", &workbook_from_grid(&second));
    let a = write_file(dir.path(), "a_wave1.xlsx", &workbook_from_grid(&first));

    let model = WorkbookReader::read_files(&[b, a]).unwrap();

    let ids: Vec<&str> = model.records().iter().map(|r| r.get("ResponseId")).collect();
    assert_eq!(ids, vec!["R_a", "R_b", "R_c"]);
    assert_eq!(model.question("Q1"), Some("New wording"));
    assert_eq!(model.question("Q2"), Some("Extra"));
    assert_eq!(model.records()[0].get("Q2"), "");
}

#[test]
fn test_combine_sheets() {
    let one = workbook_from_grid(&survey_grid(
        &["Q1"],
        &["First"],
        &[vec![Cell::Text("a")]],
    ));
    let two = workbook_from_grid(&survey_grid(
        &["Q1"],
        &["Second"],
        &[vec![Cell::Text("b")], vec![Cell::Text("c")]],
    ));

    let sheets = vec![
        WorkbookReader::read_sheet(&one).unwrap(),
        WorkbookReader::read_sheet(&two).unwrap(),
    ];
    let model = WorkbookReader::combine(sheets);

    assert_eq!(model.len(), 3);
    assert_eq!(model.question("Q1"), Some("Second"));
}
