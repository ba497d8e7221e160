//! # slim-sheets
//!
//! Random-access lookup of single cell values in XLSX workbooks, without
//! loading the sheet into memory.
//!
//! ## Features
//!
//! - Address cells by 1-based `(row, column)` or by A1 reference ("BP183")
//! - Pick a sheet by case-insensitive name, or default to the first sheet
//! - Shared strings are resolved through the workbook's string table
//! - Missing cells come back as `None`; only structural problems are errors
//!
//! Formula cells are not evaluated and always read as `None`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use slim_sheets::prelude::*;
//!
//! let mut reader = CellReader::new("report.xlsx");
//! reader.set_sheet_name("Value 1");
//!
//! match reader.get_value_by_reference("O41")? {
//!     Some(text) => println!("O41 = {}", text),
//!     None => println!("O41 is empty"),
//! }
//!
//! reader.close();
//! # Ok::<(), slim_sheets::Error>(())
//! ```

pub mod options;
pub mod prelude;
pub mod reader;

pub use options::ReaderOptions;
pub use reader::CellReader;

// Re-export core types
pub use slim_sheets_core::{
    column_to_letters, letters_to_column, parse_cell_reference, CellRef, Error as CoreError,
};

// Re-export XLSX types
pub use slim_sheets_xlsx::{
    FileWorkbook, LookupMode, RawCell, SheetData, SheetEntry, XlsxError as Error,
    XlsxResult as Result, XlsxWorkbook,
};
