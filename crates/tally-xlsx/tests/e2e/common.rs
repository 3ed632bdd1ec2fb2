//! Common utilities for E2E tests.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tally_core::ColumnToken;
use zip::write::SimpleFileOptions;

/// A cell in a fixture grid
#[derive(Debug, Clone, Copy)]
pub enum Cell<'a> {
    /// Text, stored through the shared-string table
    Text(&'a str),
    /// Numeric literal, stored inline
    Number(&'a str),
    /// No `<c>` element at all
    Absent,
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet0" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

/// Escape text for XML content
pub fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Zip the given parts, in order, into an archive
pub fn zip_parts(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, content) in parts {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Render a grid to (sharedStrings.xml, sheet1.xml)
pub fn render_grid(rows: &[Vec<Cell<'_>>]) -> (String, String) {
    let mut strings: Vec<String> = Vec::new();
    let mut sheet_rows = String::new();

    for (r, cells) in rows.iter().enumerate() {
        let row_num = r + 1;
        sheet_rows.push_str(&format!(r#"<row r="{row_num}">"#));
        for (c, cell) in cells.iter().enumerate() {
            let reference = format!("{}{}", ColumnToken::from_index(c as u32), row_num);
            match cell {
                Cell::Text(text) => {
                    let idx = match strings.iter().position(|s| s == text) {
                        Some(idx) => idx,
                        None => {
                            strings.push(text.to_string());
                            strings.len() - 1
                        }
                    };
                    sheet_rows.push_str(&format!(r#"<c r="{reference}" t="s"><v>{idx}</v></c>"#));
                }
                Cell::Number(n) => {
                    sheet_rows.push_str(&format!(r#"<c r="{reference}"><v>{n}</v></c>"#));
                }
                Cell::Absent => {}
            }
        }
        sheet_rows.push_str("</row>");
    }

    let items: String = strings
        .iter()
        .map(|s| format!(r#"<si><t xml:space="preserve">{}</t></si>"#, xml_escape(s)))
        .collect();
    let shared = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{n}" uniqueCount="{n}">{items}</sst>"#,
        n = strings.len()
    );
    let sheet = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{sheet_rows}</sheetData></worksheet>"#
    );

    (shared, sheet)
}

/// Build a complete workbook from a grid
pub fn workbook_from_grid(rows: &[Vec<Cell<'_>>]) -> Vec<u8> {
    let (shared, sheet) = render_grid(rows);
    zip_parts(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("xl/workbook.xml", WORKBOOK),
        ("xl/sharedStrings.xml", &shared),
        ("xl/worksheets/sheet1.xml", &sheet),
    ])
}

/// Build a survey-export grid: a title row, the field names, the question
/// text, an import-id row, then the respondents.
pub fn survey_grid<'a>(
    fields: &[&'a str],
    questions: &[&'a str],
    respondents: &[Vec<Cell<'a>>],
) -> Vec<Vec<Cell<'a>>> {
    let mut rows = vec![
        fields.iter().map(|_| Cell::Text("export")).collect(),
        fields.iter().map(|f| Cell::Text(*f)).collect(),
        questions.iter().map(|q| Cell::Text(*q)).collect(),
        fields.iter().map(|_| Cell::Text("{\"ImportId\":\"x\"}")).collect(),
    ];
    rows.extend(respondents.iter().cloned());
    rows
}

/// Write bytes to a file in `dir`
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
