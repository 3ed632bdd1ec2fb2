//! Row records

use std::collections::BTreeMap;

use crate::cell::ColumnToken;

/// The decoded cells of one physical worksheet row, keyed by column token.
///
/// Values are the raw decoded text of each cell: shared strings are already
/// resolved, numbers are kept as their literal text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowRecord {
    cells: BTreeMap<ColumnToken, String>,
}

impl RowRecord {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of a cell, replacing any earlier value in the same column
    pub fn insert(&mut self, column: ColumnToken, value: impl Into<String>) {
        self.cells.insert(column, value.into());
    }

    /// Get a cell value by column
    pub fn get(&self, column: &ColumnToken) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Columns present in this row, in spreadsheet column order
    pub fn columns(&self) -> impl Iterator<Item = &ColumnToken> {
        self.cells.keys()
    }

    /// Iterate over (column, value) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&ColumnToken, &str)> {
        self.cells.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Number of cells in the row
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(ColumnToken, String)> for RowRecord {
    fn from_iter<I: IntoIterator<Item = (ColumnToken, String)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
