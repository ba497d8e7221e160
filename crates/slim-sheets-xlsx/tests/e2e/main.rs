//! End-to-end tests for slim-sheets-xlsx.
//!
//! Each test builds the exact workbook it needs with [`FixtureBuilder`],
//! either in memory or in a temp directory, then reads it back with
//! `XlsxWorkbook` and asserts.

mod common;
mod reading;

// Re-export common utilities for submodules
pub use common::*;
