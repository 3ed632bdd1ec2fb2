//! Data dictionary: one row per field describing its answers

use tally_core::TabularModel;

use crate::classify::FieldType;
use crate::descriptive::round_to;

/// Distinct answers listed per field
const MAX_VALUE_LABELS: usize = 12;

const VALUE_SEPARATOR: &str = " | ";

/// Description of one survey field
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryEntry {
    pub field: String,
    /// Question text, or the field name when there is none
    pub question: String,
    pub field_type: FieldType,
    /// First distinct non-empty answers in record order, `" | "`-joined
    pub value_labels: String,
    /// Share of records with an empty answer, 4 decimals
    pub missing_rate: f64,
}

/// Build the dictionary for every field of the model, sorted by name.
///
/// A model without records has nothing to describe and yields no entries.
pub fn build_dictionary(model: &TabularModel) -> Vec<DictionaryEntry> {
    let records = model.records();
    if records.is_empty() {
        log::warn!("no records to describe in the data dictionary");
        return Vec::new();
    }

    let mut fields: Vec<&str> = model.fields().iter().map(String::as_str).collect();
    fields.sort_unstable();
    fields.dedup();

    fields
        .into_iter()
        .map(|field| {
            let values: Vec<&str> = records.iter().map(|r| r.get(field)).collect();
            let missing = values.iter().filter(|v| v.is_empty()).count();

            let question = match model.question(field) {
                Some(q) if !q.is_empty() => q.to_string(),
                _ => field.to_string(),
            };

            let mut distinct: Vec<&str> = Vec::new();
            for &v in &values {
                if !v.is_empty() && !distinct.contains(&v) {
                    distinct.push(v);
                }
            }
            distinct.truncate(MAX_VALUE_LABELS);

            DictionaryEntry {
                field: field.to_string(),
                field_type: FieldType::classify(values.iter().copied(), field, &question),
                question,
                value_labels: distinct.join(VALUE_SEPARATOR),
                missing_rate: round_to(missing as f64 / records.len() as f64, 4),
            }
        })
        .collect()
}
