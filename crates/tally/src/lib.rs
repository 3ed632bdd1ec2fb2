//! # tally
//!
//! Survey export analysis.
//!
//! Tally reads flat survey exports saved as XLSX, filters completed
//! responses, ranks scored factors by how strongly they track a stated
//! intent, and writes CSV reports and PNG bar charts.
//!
//! ## Features
//!
//! - Self-contained XLSX reading (ZIP central directory, shared strings,
//!   first worksheet)
//! - Data dictionary with field classification
//! - Factor ranking by Pearson correlation, top-box shares, segments
//! - Quote extraction with theme tagging and contact-detail redaction
//! - Deterministic PNG bar charts
//!
//! ## Example
//!
//! ```rust
//! use tally::prelude::*;
//!
//! let chart = BarChart::new(vec![0.42, 0.31], vec!["Q30", "Q55"])
//!     .unwrap()
//!     .with_title("Top factors");
//! let png = chart.to_png(&ChartOptions::default()).unwrap();
//! assert_eq!(&png[..8], &PNG_SIGNATURE);
//! ```

pub mod analysis;
pub mod error;
pub mod prelude;

pub use analysis::{Analysis, AnalysisReport, Figure};
pub use error::{Error, Result};

// Re-export core types
pub use tally_core::{
    CellReference, ColumnToken, Record, RowRecord, TabularModel, FIRST_DATA_ROW, HEADER_ROW,
    QUESTION_ROW,
};

// Re-export statistics types
pub use tally_stats::{
    scales, AnalysisConfig, DictionaryEntry, FactorDefinition, FactorSummary, FieldType,
    QuoteOptions, Quote, Scale, Segment, SegmentDefinition, StatsError, Theme,
};

// Re-export chart types
pub use tally_chart::{BarChart, Canvas, ChartError, ChartOptions, Margins, PngEncoder, Rgb, PNG_SIGNATURE};

// Re-export I/O types
pub use tally_csv::{CsvError, CsvWriteOptions, LineTerminator, ReportWriter};
pub use tally_xlsx::{WorkbookReader, XlsxError};

use std::path::Path;

/// Extension trait for TabularModel to add file I/O
pub trait TabularModelExt: Sized {
    /// Open a single survey workbook
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;

    /// Open several workbooks and concatenate them in file-name order
    fn open_all<P: AsRef<Path>>(paths: &[P]) -> Result<Self>;
}

fn check_extension(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("xlsx") => Ok(()),
        _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
    }
}

impl TabularModelExt for TabularModel {
    fn open<P: AsRef<Path>>(path: P) -> Result<TabularModel> {
        let path = path.as_ref();
        check_extension(path)?;
        Ok(WorkbookReader::read_file(path)?)
    }

    fn open_all<P: AsRef<Path>>(paths: &[P]) -> Result<TabularModel> {
        for path in paths {
            check_extension(path.as_ref())?;
        }
        Ok(WorkbookReader::read_files(paths)?)
    }
}
