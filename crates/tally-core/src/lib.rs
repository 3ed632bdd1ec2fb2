//! # tally-core
//!
//! Core data structures for the tally survey toolkit.
//!
//! This crate provides the row/column model shared by the workbook reader and
//! the statistics collaborators:
//! - [`ColumnToken`] and [`CellReference`] - Cell addressing with spreadsheet column ordering
//! - [`RowRecord`] - The decoded cells of one worksheet row
//! - [`TabularModel`] and [`Record`] - Header fields, question text and respondent records
//!
//! ## Example
//!
//! ```rust
//! use tally_core::{ColumnToken, RowRecord, TabularModel};
//!
//! let row = |cells: &[(&str, &str)]| -> RowRecord {
//!     cells
//!         .iter()
//!         .map(|(c, v)| (ColumnToken::new(c).unwrap(), v.to_string()))
//!         .collect()
//! };
//!
//! let rows = vec![
//!     row(&[]),
//!     row(&[("A", "Q1")]),
//!     row(&[("A", "How likely are you to sit the exam?")]),
//!     row(&[]),
//!     row(&[("A", "Very likely")]),
//! ];
//!
//! let model = TabularModel::from_rows(&rows);
//! assert_eq!(model.records()[0].get("Q1"), "Very likely");
//! ```

pub mod cell;
pub mod error;
pub mod model;
pub mod row;

// Re-exports for convenience
pub use cell::{CellReference, ColumnToken};
pub use error::{Error, Result};
pub use model::{Record, TabularModel};
pub use row::RowRecord;

/// Worksheet row holding the field names (1-based)
pub const HEADER_ROW: usize = 2;

/// Worksheet row holding the question text (1-based)
pub const QUESTION_ROW: usize = 3;

/// First worksheet row holding a respondent (1-based)
pub const FIRST_DATA_ROW: usize = 5;
