//! End-to-end: survey workbooks on disk to reports and charts on disk.

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tally::prelude::*;
use tally::ColumnToken;
use zip::write::SimpleFileOptions;

const FIELDS: [&str; 7] = ["ResponseId", "Finished", "Q29", "Q16", "Q53", "Q30", "Q9"];

const INFLUENCE_4: &str = "It was the primary factor in my decision to pursue a graduate program.";
const INFLUENCE_3: &str =
    "It was a significant factor among others in my decision to pursue a graduate program.";
const INFLUENCE_2: &str = "It was a minor factor in my decision to pursue a graduate program.";
const INFLUENCE_1: &str = "It had no influence on my decision to pursue a graduate program.";

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Build a survey workbook: title row, field names, question text, an
/// import-id row, then one row per respondent. `Finished` is numeric,
/// everything else goes through the shared-string table.
fn survey_workbook(respondents: &[[&str; 7]]) -> Vec<u8> {
    let questions: Vec<String> = FIELDS.iter().map(|f| format!("Question {}", f)).collect();
    let mut grid: Vec<Vec<String>> = vec![
        vec!["Survey export".to_string()],
        FIELDS.iter().map(|f| f.to_string()).collect(),
        questions,
        vec!["{\"ImportId\":\"startDate\"}".to_string()],
    ];
    grid.extend(respondents.iter().map(|r| r.iter().map(|v| v.to_string()).collect()));

    let mut strings: Vec<String> = Vec::new();
    let mut rows = String::new();
    for (r, cells) in grid.iter().enumerate() {
        rows.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, value) in cells.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let reference = format!("{}{}", ColumnToken::from_index(c as u32), r + 1);
            if r >= 4 && c == 1 {
                rows.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, value));
            } else {
                let idx = strings.iter().position(|s| s == value).unwrap_or_else(|| {
                    strings.push(value.clone());
                    strings.len() - 1
                });
                rows.push_str(&format!(r#"<c r="{}" t="s"><v>{}</v></c>"#, reference, idx));
            }
        }
        rows.push_str("</row>");
    }

    let shared: String = strings
        .iter()
        .map(|s| format!("<si><t>{}</t></si>", escape(s)))
        .collect();
    let shared = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">{}</sst>"#,
        shared
    );
    let sheet = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
        rows
    );

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, content) in [
        ("xl/worksheets/sheet1.xml", sheet),
        ("xl/sharedStrings.xml", shared),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn write_fixtures(dir: &Path) -> Vec<PathBuf> {
    let second = dir.join("b_survey.xlsx");
    fs::write(
        &second,
        survey_workbook(&[
            ["R_4", "0", "Very likely", "Full-time", "Yes", INFLUENCE_4, ""],
            ["R_5", "1", "Neither likely nor unlikely", "Full-time", "Yes", INFLUENCE_2, ""],
        ]),
    )
    .unwrap();

    let first = dir.join("a_survey.xlsx");
    fs::write(
        &first,
        survey_workbook(&[
            [
                "R_1",
                "1",
                "Very likely",
                "Full-time",
                "Yes",
                INFLUENCE_4,
                "The tuition cost was a huge burden for my family.",
            ],
            ["R_2", "1", "Somewhat likely", "Part-time", "No", INFLUENCE_3, ""],
            ["R_3", "1", "Very unlikely", "Part-time", "No", INFLUENCE_1, "  "],
        ]),
    )
    .unwrap();

    // Deliberately out of order; reading sorts by file name
    vec![second, first]
}

fn read_csv(path: &Path) -> Vec<Vec<String>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap()
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect()
}

#[test]
fn test_full_pipeline() {
    let data = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let paths = write_fixtures(data.path());

    let model = TabularModel::open_all(&paths).unwrap();
    assert_eq!(model.len(), 5);
    assert_eq!(model.records()[0].get("ResponseId"), "R_1");
    assert_eq!(model.question("Q30"), Some("Question Q30"));

    let analysis = Analysis::default();
    let report = analysis.run(model).unwrap();
    assert_eq!(report.completed_records, 4);
    assert_eq!(report.intent_responses, 4);

    let written = analysis.write(&report, out.path()).unwrap();
    let expected: Vec<PathBuf> = [
        "analysis/data_dictionary.csv",
        "analysis/rq1_top_factors.csv",
        "analysis/rq1_quotes.csv",
        "figures/rq1_top_factors_corr.png",
        "figures/rq1_intent_by_status.png",
        "figures/rq1_intent_by_awareness.png",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    assert_eq!(written, expected);
    for path in &written {
        assert!(out.path().join(path).is_file(), "{} missing", path.display());
    }

    let factors = read_csv(&out.path().join("analysis/rq1_top_factors.csv"));
    assert_eq!(
        factors,
        vec![
            vec![
                "factor_field", "factor_label", "n", "mean", "median", "top_box_pct",
                "pearson_with_intent", "abs_corr", "distribution",
            ],
            vec![
                "Q30",
                "150-credit education requirement influenced graduate enrollment",
                "4", "2.5", "2.5", "25.0", "0.983", "0.983",
                r#"{"1":1,"2":1,"3":1,"4":1}"#,
            ],
            vec![
                "Q53",
                "Awareness of alternative CPA pathway before survey",
                "4", "0.5", "0.5", "0.0", "0.507", "0.507",
                r#"{"0":2,"1":2}"#,
            ],
        ]
    );

    let dictionary = read_csv(&out.path().join("analysis/data_dictionary.csv"));
    let fields: Vec<&str> = dictionary.iter().skip(1).map(|r| r[0].as_str()).collect();
    assert_eq!(
        fields,
        vec!["Finished", "Q16", "Q29", "Q30", "Q53", "Q9", "ResponseId"]
    );
    let q9 = &dictionary[6];
    assert_eq!(q9[1], "Question Q9");
    assert_eq!(q9[4], "0.7500");

    let quotes = read_csv(&out.path().join("analysis/rq1_quotes.csv"));
    assert_eq!(
        quotes,
        vec![
            vec!["ResponseID_or_row", "question_field", "quote", "theme_label"],
            vec![
                "R_1",
                "Q9",
                "The tuition cost was a huge burden for my family.",
                "cost",
            ],
        ]
    );

    let status: Vec<(&str, f64)> = report
        .status_segments
        .iter()
        .map(|s| (s.label.as_str(), s.mean))
        .collect();
    assert_eq!(status, vec![("Full-time", 4.0), ("Part-time", 2.5)]);
    let awareness: Vec<f64> = report.awareness_segments.iter().map(|s| s.mean).collect();
    assert_eq!(awareness, vec![2.5, 4.0]);
}

#[test]
fn test_charts_are_valid_png() {
    let data = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let paths = write_fixtures(data.path());

    let analysis = Analysis::default();
    let report = analysis.run(TabularModel::open_all(&paths).unwrap()).unwrap();
    analysis.write(&report, out.path()).unwrap();

    let bytes = fs::read(out.path().join("figures/rq1_intent_by_status.png")).unwrap();
    assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    // IHDR: length 13, tag, width, height
    assert_eq!(&bytes[8..16], &[0, 0, 0, 13, b'I', b'H', b'D', b'R']);
    assert_eq!(&bytes[16..24], &[0, 0, 0x04, 0xB0, 0, 0, 0x02, 0xBC]);
    // tEXt follows IHDR
    assert_eq!(&bytes[37..41], b"tEXt");
    let title = b"Title\0Mean CPA intent by enrollment status";
    assert_eq!(&bytes[41..41 + title.len()], title);

    // Same input, same bytes
    let again = report.figures[1].chart.to_png(&ChartOptions::default()).unwrap();
    assert_eq!(bytes, again);
}

#[test]
fn test_unreadable_workbook_aborts() {
    let data = tempfile::tempdir().unwrap();
    let mut paths = write_fixtures(data.path());
    let broken = data.path().join("c_broken.xlsx");
    fs::write(&broken, b"not a zip archive").unwrap();
    paths.push(broken);

    let err = TabularModel::open_all(&paths).unwrap_err();
    assert!(matches!(
        err,
        Error::Xlsx(tally::XlsxError::CorruptArchive(_))
    ));
}
