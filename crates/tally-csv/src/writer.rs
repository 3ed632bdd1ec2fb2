//! CSV report writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tally_stats::{DictionaryEntry, FactorSummary, Quote};

use crate::error::CsvResult;
use crate::options::CsvWriteOptions;

pub const DICTIONARY_HEADER: [&str; 5] = [
    "field_name",
    "question_text_if_available",
    "type",
    "value_labels_if_any",
    "missing_rate",
];

pub const FACTORS_HEADER: [&str; 9] = [
    "factor_field",
    "factor_label",
    "n",
    "mean",
    "median",
    "top_box_pct",
    "pearson_with_intent",
    "abs_corr",
    "distribution",
];

pub const QUOTES_HEADER: [&str; 4] = [
    "ResponseID_or_row",
    "question_field",
    "quote",
    "theme_label",
];

#[derive(Serialize)]
struct DictionaryRow<'a> {
    field: &'a str,
    question: &'a str,
    field_type: &'static str,
    value_labels: &'a str,
    missing_rate: String,
}

#[derive(Serialize)]
struct FactorRow<'a> {
    field: &'a str,
    label: &'a str,
    n: usize,
    mean: f64,
    median: f64,
    top_box_pct: f64,
    pearson: Option<f64>,
    abs_corr: Option<f64>,
    distribution: String,
}

#[derive(Serialize)]
struct QuoteRow<'a> {
    respondent: &'a str,
    field: &'a str,
    quote: &'a str,
    theme: &'static str,
}

impl<'a> From<&'a DictionaryEntry> for DictionaryRow<'a> {
    fn from(e: &'a DictionaryEntry) -> Self {
        Self {
            field: &e.field,
            question: &e.question,
            field_type: e.field_type.as_str(),
            value_labels: &e.value_labels,
            missing_rate: format!("{:.4}", e.missing_rate),
        }
    }
}

impl<'a> FactorRow<'a> {
    fn new(f: &'a FactorSummary) -> CsvResult<Self> {
        Ok(Self {
            field: &f.field,
            label: &f.label,
            n: f.n,
            mean: f.mean,
            median: f.median,
            top_box_pct: f.top_box_pct,
            pearson: f.pearson,
            abs_corr: f.abs_corr,
            distribution: f.distribution_json()?,
        })
    }
}

impl<'a> From<&'a Quote> for QuoteRow<'a> {
    fn from(q: &'a Quote) -> Self {
        Self {
            respondent: &q.respondent,
            field: &q.field,
            quote: &q.text,
            theme: q.theme.as_str(),
        }
    }
}

/// Writes analysis reports as CSV
pub struct ReportWriter {
    options: CsvWriteOptions,
}

impl ReportWriter {
    pub fn new(options: CsvWriteOptions) -> Self {
        Self { options }
    }

    fn csv_writer<W: Write>(&self, writer: W) -> csv::Writer<W> {
        csv::WriterBuilder::new()
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .terminator(self.options.line_terminator.to_csv())
            .has_headers(false)
            .from_writer(writer)
    }

    /// Write the header (when enabled) and one serialized row per item
    fn write_rows<W, T, I>(&self, writer: W, header: &[&str], rows: I) -> CsvResult<()>
    where
        W: Write,
        T: Serialize,
        I: IntoIterator<Item = T>,
    {
        let mut csv_writer = self.csv_writer(writer);
        if self.options.write_header {
            csv_writer.write_record(header)?;
        }
        for row in rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the data dictionary
    pub fn write_dictionary<W: Write>(&self, entries: &[DictionaryEntry], writer: W) -> CsvResult<()> {
        self.write_rows(writer, &DICTIONARY_HEADER, entries.iter().map(DictionaryRow::from))
    }

    /// Write the factor ranking; undefined correlations are left empty
    pub fn write_factors<W: Write>(&self, factors: &[FactorSummary], writer: W) -> CsvResult<()> {
        let rows = factors
            .iter()
            .map(FactorRow::new)
            .collect::<CsvResult<Vec<_>>>()?;
        self.write_rows(writer, &FACTORS_HEADER, rows)
    }

    /// Write the selected quotes
    pub fn write_quotes<W: Write>(&self, quotes: &[Quote], writer: W) -> CsvResult<()> {
        self.write_rows(writer, &QUOTES_HEADER, quotes.iter().map(QuoteRow::from))
    }

    pub fn write_dictionary_file<P: AsRef<Path>>(
        &self,
        entries: &[DictionaryEntry],
        path: P,
    ) -> CsvResult<()> {
        self.write_dictionary(entries, BufWriter::new(File::create(path)?))
    }

    pub fn write_factors_file<P: AsRef<Path>>(
        &self,
        factors: &[FactorSummary],
        path: P,
    ) -> CsvResult<()> {
        self.write_factors(factors, BufWriter::new(File::create(path)?))
    }

    pub fn write_quotes_file<P: AsRef<Path>>(&self, quotes: &[Quote], path: P) -> CsvResult<()> {
        self.write_quotes(quotes, BufWriter::new(File::create(path)?))
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new(CsvWriteOptions::default())
    }
}
