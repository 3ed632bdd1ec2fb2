//! Quote extraction from open-ended answers

use std::collections::HashMap;

use tally_core::{Record, FIRST_DATA_ROW};

use crate::config::QuoteOptions;
use crate::themes::{redact, Theme};

const ELLIPSIS: &str = "...";

/// A redacted, themed excerpt of one answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Respondent id, or `row_<n>` when the record has none
    pub respondent: String,
    pub field: String,
    pub text: String,
    pub theme: Theme,
}

/// Identifier of the `index`-th record (0-based)
fn respondent_id(record: &Record, index: usize, options: &QuoteOptions) -> String {
    match record.get(&options.response_id_field) {
        "" => format!("row_{}", index + FIRST_DATA_ROW),
        id => id.to_string(),
    }
}

/// First line of the answer, cut to `max_chars` characters
fn excerpt(text: &str, max_chars: usize) -> String {
    let line = text.split('\n').next().unwrap_or_default().trim();
    if line.chars().count() <= max_chars {
        return line.to_string();
    }

    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut cut: String = line.chars().take(keep).collect();
    cut.push_str(ELLIPSIS);
    cut
}

/// Pick quotes from the open-ended fields of every record.
///
/// Records are visited in order and fields in configured order. An
/// answer qualifies when its redacted form is long enough and its theme
/// has not yet reached the per-theme limit.
pub fn extract_quotes(records: &[Record], options: &QuoteOptions) -> Vec<Quote> {
    let mut quotes = Vec::new();
    let mut per_theme: HashMap<Theme, usize> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        for field in &options.fields {
            let text = redact(record.get(field));
            if text.chars().count() < options.min_chars {
                continue;
            }

            let theme = Theme::classify(&text);
            let count = per_theme.entry(theme).or_insert(0);
            if *count >= options.max_per_theme {
                continue;
            }
            *count += 1;

            quotes.push(Quote {
                respondent: respondent_id(record, index, options),
                field: field.clone(),
                text: excerpt(&text, options.max_chars),
                theme,
            });
        }
    }

    log::debug!("selected {} quotes from {} records", quotes.len(), records.len());
    quotes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options() -> QuoteOptions {
        QuoteOptions {
            fields: vec!["Q32".into(), "Q9".into()],
            ..QuoteOptions::default()
        }
    }

    #[test]
    fn test_ids_and_fields() {
        let records: Vec<Record> = vec![
            [
                ("ResponseId", "R_1"),
                ("Q9", "The tuition was far too expensive for my family."),
                ("Q32", "short"),
            ]
            .into_iter()
            .collect(),
            [("Q32", "Studying for the exam took every weekend I had.")]
                .into_iter()
                .collect(),
        ];

        let quotes = extract_quotes(&records, &options());
        assert_eq!(
            quotes,
            vec![
                Quote {
                    respondent: "R_1".into(),
                    field: "Q9".into(),
                    text: "The tuition was far too expensive for my family.".into(),
                    theme: Theme::Cost,
                },
                Quote {
                    respondent: "row_6".into(),
                    field: "Q32".into(),
                    text: "Studying for the exam took every weekend I had.".into(),
                    theme: Theme::ExamDifficulty,
                },
            ]
        );
    }

    #[test]
    fn test_theme_limit() {
        let records: Vec<Record> = (0..6)
            .map(|i| {
                [("Q9", format!("Loan payments number {} are a real burden", i))]
                    .into_iter()
                    .collect()
            })
            .collect();

        let quotes = extract_quotes(&records, &options());
        assert_eq!(quotes.len(), 4);
        assert!(quotes.iter().all(|q| q.theme == Theme::Cost));
        assert_eq!(quotes[3].respondent, "row_8");
    }

    #[test]
    fn test_first_line_and_truncation() {
        let long = "a".repeat(300);
        assert_eq!(excerpt("first line  \nsecond", 280), "first line");

        let cut = excerpt(&long, 280);
        assert_eq!(cut.chars().count(), 280);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_length_counts_after_redaction() {
        // 30+ characters only because of the address, which redaction shortens
        let records: Vec<Record> = vec![[("Q9", "mail a.very.long.address@example.com")]
            .into_iter()
            .collect()];
        let quotes = extract_quotes(&records, &options());
        assert!(quotes.is_empty());
    }
}
