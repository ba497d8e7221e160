//! # slim-sheets-core
//!
//! Cell addressing for the slim-sheets cell reader.
//!
//! This crate provides:
//! - [`CellRef`] - A 1-based (row, column) coordinate parsed from A1-style references
//! - [`parse_cell_reference`] - Reference string to `(row, column)` conversion
//! - [`column_to_letters`] / [`letters_to_column`] - Base-26 column naming
//!
//! ## Example
//!
//! ```rust
//! use slim_sheets_core::{parse_cell_reference, CellRef};
//!
//! assert_eq!(parse_cell_reference("BP183").unwrap(), (183, 68));
//!
//! let cell: CellRef = "aa10".parse().unwrap();
//! assert_eq!(cell.column, 27);
//! assert_eq!(cell.to_string(), "AA10");
//! ```

pub mod cell;
pub mod error;

pub use cell::{column_to_letters, letters_to_column, parse_cell_reference, CellRef};
pub use error::{Error, Result};
