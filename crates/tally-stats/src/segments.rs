//! Mean intent per answer of a categorical field

use std::collections::BTreeMap;

use crate::config::SegmentDefinition;
use crate::descriptive::{mean, round_to};
use crate::factors::IntentResponse;

/// Mean intent of the respondents giving one answer
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub label: String,
    pub n: usize,
    /// Mean intent score, 3 decimals; 0 for an empty segment
    pub mean: f64,
}

fn group<'a>(
    responses: &[IntentResponse<'a>],
    definition: &SegmentDefinition,
) -> BTreeMap<&'a str, Vec<f64>> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for r in responses {
        let answer = r.record.get(&definition.field);
        if definition.labels.iter().any(|l| l == answer) {
            groups.entry(answer).or_default().push(f64::from(r.score));
        }
    }
    groups
}

fn segment(label: &str, scores: Option<&Vec<f64>>) -> Segment {
    let scores = scores.map(Vec::as_slice).unwrap_or_default();
    Segment {
        label: label.to_string(),
        n: scores.len(),
        mean: mean(scores).map(|m| round_to(m, 3)).unwrap_or(0.0),
    }
}

/// Segments for the answers actually given, sorted by label
pub fn observed_segments(
    responses: &[IntentResponse<'_>],
    definition: &SegmentDefinition,
) -> Vec<Segment> {
    group(responses, definition)
        .iter()
        .map(|(label, scores)| segment(label, Some(scores)))
        .collect()
}

/// One segment per configured label, in configured order
pub fn fixed_segments(
    responses: &[IntentResponse<'_>],
    definition: &SegmentDefinition,
) -> Vec<Segment> {
    let groups = group(responses, definition);
    definition
        .labels
        .iter()
        .map(|label| segment(label, groups.get(label.as_str())))
        .collect()
}
