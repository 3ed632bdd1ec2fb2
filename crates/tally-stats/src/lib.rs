//! # tally-stats
//!
//! Statistics over survey records.
//!
//! This crate provides:
//! - Ordinal answer scales (label → score)
//! - Descriptive statistics (mean, median, Pearson, top-box share)
//! - Field classification for the data dictionary
//! - Factor ranking and intent segmentation
//! - Quote extraction with theme tagging and redaction
//!
//! ## Example
//!
//! ```
//! use tally_stats::{pearson, scales};
//!
//! assert_eq!(scales::LIKELIHOOD.score("Very likely"), Some(5));
//! assert!(pearson(&[1.0, 2.0], &[2.0, 1.0]).is_none());
//! ```

pub mod classify;
pub mod config;
pub mod descriptive;
pub mod dictionary;
pub mod error;
pub mod factors;
pub mod quotes;
pub mod scales;
pub mod segments;
pub mod themes;

pub use classify::FieldType;
pub use config::{AnalysisConfig, FactorDefinition, QuoteOptions, SegmentDefinition};
pub use descriptive::{mean, median, pearson, round_to, top_box};
pub use dictionary::{build_dictionary, DictionaryEntry};
pub use error::{StatsError, StatsResult};
pub use factors::{rank_factors, scored_intents, FactorSummary, IntentResponse};
pub use quotes::{extract_quotes, Quote};
pub use scales::Scale;
pub use segments::{fixed_segments, observed_segments, Segment};
pub use themes::{redact, Theme};
