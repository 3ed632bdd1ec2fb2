//! Workbook reader
//!
//! Composes the archive reader and the part parsers into the tabular survey
//! model.

use std::fs;
use std::path::{Path, PathBuf};

use tally_core::{RowRecord, TabularModel};

use crate::archive::Archive;
use crate::error::XlsxResult;
use crate::parser::{parse_shared_strings, parse_worksheet};

/// Archive path of the shared-string table
pub const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Archive path of the worksheet holding the survey export
pub const WORKSHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// The decoded content of one workbook: its shared-string table and the
/// rows of its first worksheet, with shared strings already resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetData {
    /// Shared-string table
    pub shared_strings: Vec<String>,
    /// Worksheet rows in document order
    pub rows: Vec<RowRecord>,
}

impl SheetData {
    /// Build the tabular model for this sheet alone
    pub fn to_model(&self) -> TabularModel {
        let model = TabularModel::from_rows(&self.rows);
        if model.fields().is_empty() {
            log::warn!("worksheet has no header row ({} rows)", self.rows.len());
        }
        model
    }
}

/// Survey workbook reader
pub struct WorkbookReader;

impl WorkbookReader {
    /// Decode the shared strings and worksheet rows of a workbook
    pub fn read_sheet(bytes: &[u8]) -> XlsxResult<SheetData> {
        let archive = Archive::new(bytes)?;

        // A workbook without any text cells has no shared-string part
        let shared_strings = if archive.contains(SHARED_STRINGS_PART) {
            parse_shared_strings(&archive.read(SHARED_STRINGS_PART)?)?
        } else {
            Vec::new()
        };

        let rows = parse_worksheet(&archive.read(WORKSHEET_PART)?, &shared_strings)?;

        Ok(SheetData {
            shared_strings,
            rows,
        })
    }

    /// Read a workbook from its bytes
    pub fn read(bytes: &[u8]) -> XlsxResult<TabularModel> {
        Ok(Self::read_sheet(bytes)?.to_model())
    }

    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<TabularModel> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let model = Self::read(&bytes)?;
        log::debug!(
            "read {} records from '{}'",
            model.len(),
            path.display()
        );
        Ok(model)
    }

    /// Read several workbooks into one model.
    ///
    /// Files are processed in file-name order; records are appended and
    /// question text from later files replaces earlier text for the same
    /// field. The first file that fails aborts the whole read.
    pub fn read_files<P: AsRef<Path>>(paths: &[P]) -> XlsxResult<TabularModel> {
        let mut sorted: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();
        sorted.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));

        let mut model = TabularModel::new();
        for path in &sorted {
            model.merge(Self::read_file(path)?);
        }

        log::info!(
            "loaded {} records from {} workbook(s)",
            model.len(),
            sorted.len()
        );
        Ok(model)
    }

    /// Combine already-decoded sheets, in the given order, into one model
    pub fn combine<I: IntoIterator<Item = SheetData>>(sheets: I) -> TabularModel {
        let mut model = TabularModel::new();
        for sheet in sheets {
            model.merge(sheet.to_model());
        }
        model
    }
}
