//! Field type classification for the data dictionary

use std::collections::BTreeSet;
use std::fmt;

use crate::scales::is_ordinal_label;

/// Answers longer than this mark a field as free text
const LONG_ANSWER_CHARS: usize = 120;

/// At most this many distinct answers make a multiple-choice field
const MAX_CHOICES: usize = 10;

/// Question wording that introduces a free-text answer
const TEXT_PROMPTS: [&str; 3] = ["Please explain", "Please briefly", "Please share"];

/// Kind of answers a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Likert,
    MultiChoice,
    Other,
}

impl FieldType {
    /// Label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Likert => "Likert",
            FieldType::MultiChoice => "multi-choice",
            FieldType::Other => "other",
        }
    }

    /// Classify a field from its name, question text and answers.
    ///
    /// Checks run in order: no answers, free text, ordinal scale, choice.
    pub fn classify<'a, I>(values: I, name: &str, question: &str) -> FieldType
    where
        I: IntoIterator<Item = &'a str>,
    {
        let answers: Vec<&str> = values.into_iter().filter(|v| !v.is_empty()).collect();
        if answers.is_empty() {
            return FieldType::Other;
        }

        let longest = answers.iter().map(|v| v.chars().count()).max().unwrap_or(0);
        if name.ends_with("_TEXT")
            || TEXT_PROMPTS.iter().any(|p| question.contains(p))
            || longest > LONG_ANSWER_CHARS
        {
            return FieldType::Text;
        }

        let distinct: BTreeSet<&str> = answers.into_iter().collect();
        if distinct.iter().all(|v| is_ordinal_label(v)) {
            return FieldType::Likert;
        }
        if distinct.iter().all(|v| *v == "Yes" || *v == "No") || distinct.len() <= MAX_CHOICES {
            return FieldType::MultiChoice;
        }

        FieldType::Other
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
