//! Error type for the tally facade

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Any error raised while reading, analysing or writing a survey
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a workbook failed
    #[error(transparent)]
    Xlsx(#[from] tally_xlsx::XlsxError),

    /// Rendering or writing a chart failed
    #[error(transparent)]
    Chart(#[from] tally_chart::ChartError),

    /// Writing a CSV report failed
    #[error(transparent)]
    Csv(#[from] tally_csv::CsvError),

    /// The analysis could not run
    #[error(transparent)]
    Stats(#[from] tally_stats::StatsError),

    /// IO error (creating output directories)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a workbook this crate reads
    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}
