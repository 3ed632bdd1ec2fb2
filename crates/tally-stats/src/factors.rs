//! Factor ranking: how strongly each scored answer tracks intent

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tally_core::Record;

use crate::config::{AnalysisConfig, FactorDefinition};
use crate::descriptive::{mean, median, pearson, round_to, top_box};
use crate::error::StatsResult;

/// A record whose intent answer is on the intent scale
#[derive(Debug, Clone, Copy)]
pub struct IntentResponse<'a> {
    pub record: &'a Record,
    pub score: i32,
}

/// Records with a scoreable intent answer, in input order
pub fn scored_intents<'a>(records: &'a [Record], config: &AnalysisConfig) -> Vec<IntentResponse<'a>> {
    records
        .iter()
        .filter_map(|record| {
            config
                .intent_scale
                .score(record.get(&config.intent_field))
                .map(|score| IntentResponse { record, score })
        })
        .collect()
}

/// Summary statistics of one factor against intent
#[derive(Debug, Clone, PartialEq)]
pub struct FactorSummary {
    pub field: String,
    pub label: String,
    /// Respondents with both a factor score and an intent score
    pub n: usize,
    /// Mean factor score, 3 decimals
    pub mean: f64,
    pub median: f64,
    /// Percentage at or above the top-box threshold, 1 decimal
    pub top_box_pct: f64,
    /// Correlation with intent, 3 decimals; `None` when undefined
    pub pearson: Option<f64>,
    /// `|pearson|`, 3 decimals
    pub abs_corr: Option<f64>,
    /// Count of respondents per factor score
    pub distribution: BTreeMap<i32, usize>,
}

impl FactorSummary {
    /// Summarise one factor over the intent responses.
    ///
    /// Returns `None` when no respondent answered the factor on its scale.
    pub fn compute(
        factor: &FactorDefinition,
        responses: &[IntentResponse<'_>],
        top_box_threshold: i32,
    ) -> Option<Self> {
        let (scores, intents): (Vec<f64>, Vec<f64>) = responses
            .iter()
            .filter_map(|r| {
                factor
                    .scale
                    .score(r.record.get(&factor.field))
                    .map(|s| (f64::from(s), f64::from(r.score)))
            })
            .unzip();

        if scores.is_empty() {
            return None;
        }

        let mut distribution = BTreeMap::new();
        for &s in &scores {
            *distribution.entry(s as i32).or_insert(0) += 1;
        }

        let r = pearson(&scores, &intents);

        Some(Self {
            field: factor.field.clone(),
            label: factor.label.clone(),
            n: scores.len(),
            mean: round_to(mean(&scores)?, 3),
            median: median(&scores)?,
            top_box_pct: round_to(top_box(&scores, f64::from(top_box_threshold))? * 100.0, 1),
            pearson: r.map(|r| round_to(r, 3)),
            abs_corr: r.map(|r| round_to(r.abs(), 3)),
            distribution,
        })
    }

    /// The distribution as a JSON object keyed by score
    pub fn distribution_json(&self) -> StatsResult<String> {
        Ok(serde_json::to_string(&self.distribution)?)
    }
}

/// Summarise every configured factor, strongest absolute correlation first.
///
/// Factors nobody answered are left out. Undefined correlations sort
/// last; ties keep configuration order.
pub fn rank_factors(responses: &[IntentResponse<'_>], config: &AnalysisConfig) -> Vec<FactorSummary> {
    let mut summaries: Vec<FactorSummary> = config
        .factors
        .iter()
        .filter_map(|f| {
            let summary = FactorSummary::compute(f, responses, config.top_box_threshold);
            if summary.is_none() {
                log::debug!("factor {} has no scored answers", f.field);
            }
            summary
        })
        .collect();

    let key = |s: &FactorSummary| s.abs_corr.unwrap_or(-1.0);
    summaries.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    summaries
}
