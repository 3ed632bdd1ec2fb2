//! Quote themes and redaction of contact details

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+").expect("email pattern is valid"));

static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\+?\d?[\d() -]{8,}\b").expect("phone pattern is valid"));

pub const EMAIL_PLACEHOLDER: &str = "[REDACTED_EMAIL]";
pub const PHONE_PLACEHOLDER: &str = "[REDACTED_PHONE]";

/// Replace e-mail addresses and phone-like digit runs, then trim
pub fn redact(text: &str) -> String {
    let text = EMAIL.replace_all(text, EMAIL_PLACEHOLDER);
    let text = PHONE.replace_all(&text, PHONE_PLACEHOLDER);
    text.trim().to_string()
}

/// Theme of an open-ended answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Theme {
    Cost,
    Time,
    ExamDifficulty,
    EmployerSupport,
    EducationRequirement,
    WorkExperienceRequirement,
    RoiValue,
    AwarenessConfusion,
    EquityAccess,
    Other,
}

/// Keywords per theme, checked in this order; the first hit wins
const KEYWORDS: [(Theme, &[&str]); 9] = [
    (
        Theme::Cost,
        &["tuition", "afford", "loan", "cost", "debt", "expensive"],
    ),
    (
        Theme::Time,
        &["time", "years", "delay", "full-time", "hours", "workload"],
    ),
    (
        Theme::ExamDifficulty,
        &["exam", "pass rate", "cpa prep", "study"],
    ),
    (
        Theme::EmployerSupport,
        &["employer", "job offer", "promotion", "firm"],
    ),
    (
        Theme::EducationRequirement,
        &["150", "credit hour", "graduate degree", "master", "macc", "mba"],
    ),
    (
        Theme::WorkExperienceRequirement,
        &["experience", "work experience", "2 years", "extra year"],
    ),
    (
        Theme::RoiValue,
        &["earn", "salary", "lifetime", "return", "roi", "payoff", "career ladder"],
    ),
    (
        Theme::AwarenessConfusion,
        &["aware", "know", "confus", "pathway", "understand"],
    ),
    (
        Theme::EquityAccess,
        &["low-income", "family", "access", "equity", "children"],
    ),
];

impl Theme {
    /// Classify text by lower-cased keyword matching
    pub fn classify(text: &str) -> Theme {
        let text = text.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| text.contains(w)))
            .map(|&(theme, _)| theme)
            .unwrap_or(Theme::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Cost => "cost",
            Theme::Time => "time",
            Theme::ExamDifficulty => "exam difficulty",
            Theme::EmployerSupport => "employer support",
            Theme::EducationRequirement => "education requirement",
            Theme::WorkExperienceRequirement => "work experience requirement",
            Theme::RoiValue => "ROI/value",
            Theme::AwarenessConfusion => "awareness/confusion",
            Theme::EquityAccess => "equity/access",
            Theme::Other => "other",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
