//! # tally-csv
//!
//! CSV writer for tally's analysis reports.

mod error;
mod options;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvWriteOptions, LineTerminator};
pub use writer::{ReportWriter, DICTIONARY_HEADER, FACTORS_HEADER, QUOTES_HEADER};
