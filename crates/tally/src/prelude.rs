//! Prelude module - common imports for tally users
//!
//! ```rust
//! use tally::prelude::*;
//! ```

pub use crate::{
    // Pipeline
    Analysis,
    AnalysisConfig,
    AnalysisReport,
    // Charts
    BarChart,
    ChartOptions,
    CsvWriteOptions,
    // Error types
    Error,
    Result,
    // Model types
    Record,
    TabularModel,
    // Extension traits
    TabularModelExt,
    // I/O types
    WorkbookReader,
    PNG_SIGNATURE,
};
