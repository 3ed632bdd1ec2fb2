//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur while reading a survey workbook
///
/// Every variant is fatal for the file being read; there is no partial
/// recovery.
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error at the file boundary
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive structure unreadable, or an entry does not match its declared size or checksum
    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),

    /// Named part absent from the archive
    #[error("Missing archive entry: {0}")]
    MissingEntry(String),

    /// A cell references a shared string that does not exist
    #[error("Shared string index {index} out of range (table has {len} entries)")]
    InvalidSharedStringIndex {
        /// Raw index text found in the cell
        index: String,
        /// Length of the shared-string table
        len: usize,
    },

    /// Required XML structure absent or unbalanced
    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),
}

impl XlsxError {
    pub(crate) fn corrupt<S: Into<String>>(msg: S) -> Self {
        XlsxError::CorruptArchive(msg.into())
    }

    pub(crate) fn malformed<S: Into<String>>(msg: S) -> Self {
        XlsxError::MalformedMarkup(msg.into())
    }
}

impl From<quick_xml::Error> for XlsxError {
    fn from(err: quick_xml::Error) -> Self {
        XlsxError::MalformedMarkup(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for XlsxError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        XlsxError::MalformedMarkup(err.to_string())
    }
}
