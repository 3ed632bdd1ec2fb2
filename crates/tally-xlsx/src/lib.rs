//! # tally-xlsx
//!
//! Minimal XLSX reader for flat survey exports.
//!
//! Only what a survey export needs is read: the shared-string table and the
//! first worksheet's cell grid. Formulas, styles, merged cells and further
//! sheets are ignored.

pub mod archive;
pub mod error;
pub mod parser;
pub mod reader;

pub use archive::{Archive, ArchiveEntry, CompressionMethod};
pub use error::{XlsxError, XlsxResult};
pub use parser::{parse_shared_strings, parse_worksheet};
pub use reader::{SheetData, WorkbookReader, SHARED_STRINGS_PART, WORKSHEET_PART};
