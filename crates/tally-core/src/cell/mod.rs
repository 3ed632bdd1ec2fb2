//! Cell addressing
//!
//! This module contains:
//! - [`ColumnToken`] - The letters of a cell reference, with spreadsheet column ordering
//! - [`CellReference`] - A cell's location (e.g., "B3")

mod address;

pub use address::{CellReference, ColumnToken};
