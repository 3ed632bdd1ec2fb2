//! Analysis configuration

use crate::error::{StatsError, StatsResult};
use crate::scales::{self, Scale};

/// A survey field scored on a scale and correlated with intent
#[derive(Debug, Clone, PartialEq)]
pub struct FactorDefinition {
    pub field: String,
    pub label: String,
    pub scale: Scale,
}

impl FactorDefinition {
    pub fn new(field: impl Into<String>, label: impl Into<String>, scale: Scale) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            scale,
        }
    }
}

/// A categorical field used to split respondents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentDefinition {
    pub field: String,
    /// Answers that form a segment
    pub labels: Vec<String>,
    /// Chart title for this segmentation
    pub title: String,
}

impl SegmentDefinition {
    pub fn new<L, S>(field: impl Into<String>, labels: L, title: impl Into<String>) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.into(),
            labels: labels.into_iter().map(Into::into).collect(),
            title: title.into(),
        }
    }
}

/// Options for selecting and truncating quotes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteOptions {
    /// Open-ended fields scanned for quotes, in order
    pub fields: Vec<String>,
    /// Redacted answers shorter than this (in characters) are skipped
    pub min_chars: usize,
    /// Longer quotes are cut and end in `...`
    pub max_chars: usize,
    pub max_per_theme: usize,
    /// Field holding the respondent id
    pub response_id_field: String,
}

impl Default for QuoteOptions {
    fn default() -> Self {
        Self {
            fields: ["Q32", "Q36", "Q38", "Q45", "Q50", "Q56", "Q59", "Q9"]
                .into_iter()
                .map(String::from)
                .collect(),
            min_chars: 30,
            max_chars: 280,
            max_per_theme: 4,
            response_id_field: "ResponseId".to_string(),
        }
    }
}

/// Everything the analysis pipeline needs to know about the survey
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Only records with `completion_field == completion_value` are analysed
    pub completion_field: String,
    pub completion_value: String,
    /// The outcome every factor is correlated with
    pub intent_field: String,
    pub intent_scale: Scale,
    pub factors: Vec<FactorDefinition>,
    /// Segmentation by observed answers, sorted
    pub status: SegmentDefinition,
    /// Segmentation with a fixed label order; absent segments score 0
    pub awareness: SegmentDefinition,
    pub quotes: QuoteOptions,
    /// Scores at or above this count toward the top box
    pub top_box_threshold: i32,
    /// Number of factors in the correlation chart
    pub top_factor_count: usize,
    pub top_factors_title: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            completion_field: "Finished".to_string(),
            completion_value: "1".to_string(),
            intent_field: "Q29".to_string(),
            intent_scale: scales::LIKELIHOOD,
            factors: vec![
                FactorDefinition::new(
                    "Q30",
                    "150-credit education requirement influenced graduate enrollment",
                    scales::INFLUENCE,
                ),
                FactorDefinition::new(
                    "Q39_1",
                    "Importance of CPA exam preparation in program value",
                    scales::IMPORTANCE,
                ),
                FactorDefinition::new(
                    "Q55",
                    "Belief that graduate degree increases lifetime earnings (ROI)",
                    scales::DEFINITENESS,
                ),
                FactorDefinition::new(
                    "Q53",
                    "Awareness of alternative CPA pathway before survey",
                    scales::YES_NO,
                ),
                FactorDefinition::new(
                    "Q49",
                    "Employer requires/encourages graduate degree",
                    scales::YES_NO,
                ),
                FactorDefinition::new(
                    "Q6",
                    "Perception of alternative pathway (fewer credits + extra work year)",
                    scales::SENTIMENT,
                ),
            ],
            status: SegmentDefinition::new(
                "Q16",
                ["Full-time", "Part-time"],
                "Mean CPA intent by enrollment status",
            ),
            awareness: SegmentDefinition::new(
                "Q53",
                ["No", "Yes"],
                "Mean CPA intent by pathway awareness",
            ),
            quotes: QuoteOptions::default(),
            top_box_threshold: 4,
            top_factor_count: 5,
            top_factors_title: "Top factors by absolute correlation with CPA intent".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Check the configuration for values the pipeline cannot work with
    pub fn validate(&self) -> StatsResult<()> {
        if self.completion_field.is_empty() {
            return Err(StatsError::InvalidConfig("completion field is empty".into()));
        }
        if self.intent_field.is_empty() || self.intent_scale.is_empty() {
            return Err(StatsError::InvalidConfig(
                "intent field and scale must be set".into(),
            ));
        }
        if let Some(f) = self.factors.iter().find(|f| f.field.is_empty()) {
            return Err(StatsError::InvalidConfig(format!(
                "factor '{}' has no field",
                f.label
            )));
        }
        if self.quotes.max_chars < 3 {
            return Err(StatsError::InvalidConfig(format!(
                "quote length limit {} leaves no room for an ellipsis",
                self.quotes.max_chars
            )));
        }
        Ok(())
    }
}
