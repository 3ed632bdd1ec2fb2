//! Chart error types

use thiserror::Error;

/// Result type for chart operations
pub type ChartResult<T> = std::result::Result<T, ChartError>;

/// Errors that can occur while rendering or encoding a chart
#[derive(Debug, Error)]
pub enum ChartError {
    /// Canvas size unusable (zero, too large, or smaller than the margins)
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Values and labels differ in length
    #[error("Got {values} values but {labels} labels")]
    LabelMismatch { values: usize, labels: usize },

    /// The compressor failed
    #[error("Compression failed: {0}")]
    Compression(#[source] std::io::Error),

    /// A chunk payload does not fit the 32-bit length field
    #[error("Chunk payload of {0} bytes is too large")]
    ChunkTooLarge(usize),

    /// IO error while writing the image file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
