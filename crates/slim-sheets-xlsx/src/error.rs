//! XLSX error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Structural errors that can occur while opening a workbook or resolving a sheet
///
/// Cell-level problems (out of range coordinates, gaps, formula cells, bad
/// shared string indices) are never reported through this type; lookups
/// return `None` for those.
#[derive(Debug, Error)]
pub enum XlsxError {
    /// The workbook path does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file is not a readable XLSX package
    #[error("Corrupt XLSX package: {0}")]
    Corrupt(String),

    /// No sheet name was given and the first sheet has no data
    #[error("No sheet data")]
    NoSheetData,

    /// No declared sheet matches the requested name
    #[error("{0} not found")]
    SheetNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Core error
    #[error(transparent)]
    Core(#[from] slim_sheets_core::Error),
}
