//! Ordinal answer scales
//!
//! Each scale maps the exact wording of a response option to its score.
//! Scales are immutable and passed around by value.

use std::fmt;

/// An immutable label-to-score mapping
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    name: &'static str,
    entries: &'static [(&'static str, i32)],
}

impl Scale {
    /// Create a scale from `(label, score)` pairs
    pub const fn new(name: &'static str, entries: &'static [(&'static str, i32)]) -> Self {
        Self { name, entries }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Score of an answer, or `None` if the answer is not on this scale
    pub fn score(&self, label: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|&(_, score)| score)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.score(label).is_some()
    }

    /// Labels in score order
    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|&(l, _)| l)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Scale").field(&self.name).finish()
    }
}

pub const AGREEMENT: Scale = Scale::new(
    "agreement",
    &[
        ("Strongly disagree", 1),
        ("Somewhat disagree", 2),
        ("Neither agree nor disagree", 3),
        ("Somewhat agree", 4),
        ("Strongly agree", 5),
    ],
);

pub const LIKELIHOOD: Scale = Scale::new(
    "likelihood",
    &[
        ("Very unlikely", 1),
        ("Somewhat unlikely", 2),
        ("Neither likely nor unlikely", 3),
        ("Somewhat likely", 4),
        ("Very likely", 5),
    ],
);

pub const IMPORTANCE: Scale = Scale::new(
    "importance",
    &[
        ("Not at all important", 1),
        ("Slightly important", 2),
        ("Moderately important", 3),
        ("Very important", 4),
        ("Extremely important", 5),
    ],
);

pub const YES_NO: Scale = Scale::new("yes/no", &[("No", 0), ("Yes", 1)]);

pub const DEFINITENESS: Scale = Scale::new(
    "definiteness",
    &[
        ("Definitely not", 1),
        ("Probably not", 2),
        ("Might or might not", 3),
        ("Probably yes", 4),
        ("Definitely yes", 5),
    ],
);

pub const SENTIMENT: Scale = Scale::new(
    "sentiment",
    &[
        ("Very Negative", 1),
        ("Somewhat Negative", 2),
        ("Neutral", 3),
        ("Somewhat Positive", 4),
        ("Very Positive", 5),
    ],
);

pub const INFLUENCE: Scale = Scale::new(
    "influence",
    &[
        (
            "It had no influence on my decision to pursue a graduate program.",
            1,
        ),
        (
            "It was a minor factor in my decision to pursue a graduate program.",
            2,
        ),
        (
            "It was a significant factor among others in my decision to pursue a graduate program.",
            3,
        ),
        (
            "It was the primary factor in my decision to pursue a graduate program.",
            4,
        ),
        (
            "It was the only reason I chose to pursue a graduate program.",
            5,
        ),
    ],
);

/// The five-point scales used to recognise Likert-style fields
pub const ORDINAL_SCALES: [Scale; 6] = [
    AGREEMENT,
    LIKELIHOOD,
    IMPORTANCE,
    DEFINITENESS,
    SENTIMENT,
    INFLUENCE,
];

/// Whether `label` appears on any of the ordinal scales
pub fn is_ordinal_label(label: &str) -> bool {
    ORDINAL_SCALES.iter().any(|s| s.contains(label))
}
