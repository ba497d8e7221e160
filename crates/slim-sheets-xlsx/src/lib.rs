//! # slim-sheets-xlsx
//!
//! On-demand cell lookup in XLSX (Office Open XML) workbooks.
//!
//! Nothing is loaded up front: each lookup resolves the sheet, streams the
//! worksheet part until the requested cell is reached and, for shared-string
//! cells, streams the shared string table until the requested entry.

pub mod error;
pub mod reader;

mod package;

pub use error::{XlsxError, XlsxResult};
pub use reader::{FileWorkbook, LookupMode, RawCell, SheetData, SheetEntry, XlsxWorkbook};
