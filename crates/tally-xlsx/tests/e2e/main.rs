//! End-to-end tests for tally-xlsx.
//!
//! Each test builds the workbook it needs in memory with the `zip` crate,
//! so the hand-written archive reader is always exercised against archives
//! produced by an independent writer.

mod common;
mod reading;

// Re-export common utilities for submodules
pub use common::*;
