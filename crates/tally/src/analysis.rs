//! The survey analysis pipeline
//!
//! Filters completed responses, then derives the data dictionary, the
//! factor ranking, the intent segments and the quote selection. The
//! resulting [`AnalysisReport`] writes three CSV reports and three bar
//! charts under an output directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::prelude::*;
//!
//! let model = TabularModel::open_all(&["data/survey.xlsx"])?;
//! let analysis = Analysis::default();
//! let report = analysis.run(model)?;
//! let written = analysis.write(&report, "out")?;
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tally_chart::{BarChart, ChartOptions};
use tally_core::TabularModel;
use tally_csv::{CsvWriteOptions, ReportWriter};
use tally_stats::{
    build_dictionary, extract_quotes, fixed_segments, observed_segments, rank_factors,
    scored_intents, AnalysisConfig, DictionaryEntry, FactorSummary, Quote, Segment,
};

use crate::error::Result;

/// Directory of the CSV reports, relative to the output root
pub const ANALYSIS_DIR: &str = "analysis";
/// Directory of the charts, relative to the output root
pub const FIGURES_DIR: &str = "figures";

pub const DICTIONARY_FILE: &str = "data_dictionary.csv";
pub const FACTORS_FILE: &str = "rq1_top_factors.csv";
pub const QUOTES_FILE: &str = "rq1_quotes.csv";
pub const TOP_FACTORS_FIGURE: &str = "rq1_top_factors_corr.png";
pub const STATUS_FIGURE: &str = "rq1_intent_by_status.png";
pub const AWARENESS_FIGURE: &str = "rq1_intent_by_awareness.png";

/// A chart and the file it is written to
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub file_name: &'static str,
    pub chart: BarChart,
}

/// Everything derived from the completed responses
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Records before filtering
    pub total_records: usize,
    /// Records kept by the completion filter
    pub completed_records: usize,
    /// Completed records with a scoreable intent answer
    pub intent_responses: usize,
    pub dictionary: Vec<DictionaryEntry>,
    pub factors: Vec<FactorSummary>,
    pub status_segments: Vec<Segment>,
    pub awareness_segments: Vec<Segment>,
    pub quotes: Vec<Quote>,
    pub figures: Vec<Figure>,
}

/// Configured analysis run
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub config: AnalysisConfig,
    pub chart_options: ChartOptions,
    pub csv_options: CsvWriteOptions,
}

impl Analysis {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_chart_options(mut self, options: ChartOptions) -> Self {
        self.chart_options = options;
        self
    }

    pub fn with_csv_options(mut self, options: CsvWriteOptions) -> Self {
        self.csv_options = options;
        self
    }

    /// Analyse the completed responses of `model`
    pub fn run(&self, mut model: TabularModel) -> Result<AnalysisReport> {
        let config = &self.config;
        config.validate()?;

        let total_records = model.len();
        model.retain(|r| r.get(&config.completion_field) == config.completion_value);
        if model.is_empty() {
            log::warn!(
                "no completed responses among {} records ({} = {})",
                total_records,
                config.completion_field,
                config.completion_value
            );
        }
        log::info!(
            "analysing {} of {} records",
            model.len(),
            total_records
        );

        let dictionary = build_dictionary(&model);

        let responses = scored_intents(model.records(), config);
        let factors = rank_factors(&responses, config);
        let status_segments = observed_segments(&responses, &config.status);
        let awareness_segments = fixed_segments(&responses, &config.awareness);
        let intent_responses = responses.len();

        let quotes = extract_quotes(model.records(), &config.quotes);

        let figures = self.figures(&factors, &status_segments, &awareness_segments)?;

        Ok(AnalysisReport {
            total_records,
            completed_records: model.len(),
            intent_responses,
            dictionary,
            factors,
            status_segments,
            awareness_segments,
            quotes,
            figures,
        })
    }

    fn figures(
        &self,
        factors: &[FactorSummary],
        status: &[Segment],
        awareness: &[Segment],
    ) -> Result<Vec<Figure>> {
        let top = &factors[..factors.len().min(self.config.top_factor_count)];
        let top_chart = BarChart::new(
            top.iter().map(|f| f.abs_corr.unwrap_or(0.0)).collect(),
            top.iter().map(|f| f.field.as_str()).collect(),
        )?
        .with_title(self.config.top_factors_title.as_str());

        let segment_chart = |segments: &[Segment], title: &str| -> Result<BarChart> {
            Ok(BarChart::new(
                segments.iter().map(|s| s.mean).collect(),
                segments.iter().map(|s| s.label.as_str()).collect(),
            )?
            .with_title(title))
        };

        Ok(vec![
            Figure {
                file_name: TOP_FACTORS_FIGURE,
                chart: top_chart,
            },
            Figure {
                file_name: STATUS_FIGURE,
                chart: segment_chart(status, &self.config.status.title)?,
            },
            Figure {
                file_name: AWARENESS_FIGURE,
                chart: segment_chart(awareness, &self.config.awareness.title)?,
            },
        ])
    }

    /// Write the reports and charts under `out_dir`, creating the
    /// `analysis/` and `figures/` directories as needed.
    ///
    /// Returns the written paths relative to `out_dir`.
    pub fn write<P: AsRef<Path>>(&self, report: &AnalysisReport, out_dir: P) -> Result<Vec<PathBuf>> {
        let out_dir = out_dir.as_ref();
        let analysis_dir = out_dir.join(ANALYSIS_DIR);
        let figures_dir = out_dir.join(FIGURES_DIR);
        fs::create_dir_all(&analysis_dir)?;
        fs::create_dir_all(&figures_dir)?;

        let mut written = Vec::with_capacity(3 + report.figures.len());

        let writer = ReportWriter::new(self.csv_options.clone());
        writer.write_dictionary_file(&report.dictionary, analysis_dir.join(DICTIONARY_FILE))?;
        written.push(Path::new(ANALYSIS_DIR).join(DICTIONARY_FILE));
        writer.write_factors_file(&report.factors, analysis_dir.join(FACTORS_FILE))?;
        written.push(Path::new(ANALYSIS_DIR).join(FACTORS_FILE));
        writer.write_quotes_file(&report.quotes, analysis_dir.join(QUOTES_FILE))?;
        written.push(Path::new(ANALYSIS_DIR).join(QUOTES_FILE));

        for figure in &report.figures {
            figure
                .chart
                .save(figures_dir.join(figure.file_name), &self.chart_options)?;
            written.push(Path::new(FIGURES_DIR).join(figure.file_name));
        }

        log::info!("wrote {} files under '{}'", written.len(), out_dir.display());
        Ok(written)
    }
}
