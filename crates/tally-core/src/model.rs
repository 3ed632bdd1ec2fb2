//! Tabular survey model

use std::collections::BTreeMap;

use crate::cell::ColumnToken;
use crate::row::RowRecord;
use crate::{FIRST_DATA_ROW, HEADER_ROW, QUESTION_ROW};

/// One respondent: field name to trimmed value.
///
/// Every field of the source header is present; an empty string means the
/// respondent left the field blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: BTreeMap<String, String>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    /// Get a field value, `""` when the field is missing or blank
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Check whether the field exists in this record
    pub fn contains_field(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Field names in sorted order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterate over (field, value) pairs in sorted field order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Header fields, question text and respondent records of one or more
/// survey exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularModel {
    fields: Vec<String>,
    questions: BTreeMap<String, String>,
    records: Vec<Record>,
}

impl TabularModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from the physical rows of one worksheet.
    ///
    /// The second row holds the field names, the third the question text, and
    /// respondent rows start at the fifth. Columns are taken from the header
    /// row in spreadsheet column order. A sheet with fewer than two rows
    /// yields an empty model.
    pub fn from_rows(rows: &[RowRecord]) -> Self {
        let header = match rows.get(HEADER_ROW - 1) {
            Some(row) => row,
            None => return Self::default(),
        };

        let columns: Vec<(&ColumnToken, String)> = header
            .iter()
            .map(|(col, name)| (col, name.trim().to_string()))
            .collect();

        let mut fields: Vec<String> = Vec::with_capacity(columns.len());
        for (_, name) in &columns {
            if !fields.contains(name) {
                fields.push(name.clone());
            }
        }

        let question_row = rows.get(QUESTION_ROW - 1);
        let questions = columns
            .iter()
            .map(|(col, name)| {
                let text = question_row.and_then(|r| r.get(col)).unwrap_or("").trim();
                (name.clone(), text.to_string())
            })
            .collect();

        let records = rows
            .iter()
            .skip(FIRST_DATA_ROW - 1)
            .map(|row| {
                columns
                    .iter()
                    .map(|(col, name)| {
                        let value = row.get(col).unwrap_or("").trim();
                        (name.clone(), value.to_string())
                    })
                    .collect()
            })
            .collect();

        Self {
            fields,
            questions,
            records,
        }
    }

    /// Append another model: records are concatenated, fields are unioned in
    /// first-seen order and question text from `other` wins on collision.
    pub fn merge(&mut self, other: TabularModel) {
        for field in other.fields {
            if !self.fields.contains(&field) {
                self.fields.push(field);
            }
        }
        self.questions.extend(other.questions);
        self.records.extend(other.records);
    }

    /// Field names in header order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Question text for a field, if the header declared it
    pub fn question(&self, field: &str) -> Option<&str> {
        self.questions.get(field).map(String::as_str)
    }

    /// All question texts keyed by field name
    pub fn questions(&self) -> &BTreeMap<String, String> {
        &self.questions
    }

    /// Respondent records
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consume the model and return its records
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Keep only the records matching a predicate
    pub fn retain<F: FnMut(&Record) -> bool>(&mut self, f: F) {
        self.records.retain(f);
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the model has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
