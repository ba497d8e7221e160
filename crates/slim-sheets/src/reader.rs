//! Path-based cell reader

use std::fmt;
use std::path::{Path, PathBuf};

use slim_sheets_core::CellRef;
use slim_sheets_xlsx::{FileWorkbook, LookupMode};

use crate::options::ReaderOptions;
use crate::Result;

/// Reads individual cell values from an XLSX file on demand
///
/// The reader holds at most one open workbook. It is opened explicitly with
/// [`open`](Self::open) or lazily by the first lookup, and released by
/// [`close`](Self::close) or when the reader is dropped. Opening again
/// always releases the previous workbook first.
///
/// Lookups take `&mut self`. There is no internal locking: sharing a reader
/// between threads needs external synchronization such as a `Mutex`.
///
/// # Example
///
/// ```rust,no_run
/// use slim_sheets::CellReader;
///
/// let mut reader = CellReader::new("FatExcel.xlsx");
/// reader.open()?;
///
/// reader.set_sheet_name("Value 1");
/// let a = reader.get_value_by_reference("BP183")?;
/// let b = reader.get_value(41, 15)?;
///
/// reader.set_sheet_name("Value 2");
/// let c = reader.get_value_by_reference("A1")?;
/// # let _ = (a, b, c);
/// # Ok::<(), slim_sheets::Error>(())
/// ```
pub struct CellReader {
    path: PathBuf,
    options: ReaderOptions,
    workbook: Option<FileWorkbook>,
}

impl CellReader {
    /// Create a reader for `path` with default options
    ///
    /// Nothing is opened until [`open`](Self::open) or the first lookup.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self::with_options(path, ReaderOptions::default())
    }

    /// Create a reader for `path` with the given options
    pub fn with_options<P: Into<PathBuf>>(path: P, options: ReaderOptions) -> Self {
        Self {
            path: path.into(),
            options,
            workbook: None,
        }
    }

    /// Path of the workbook file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Change the workbook file; takes effect on the next [`open`](Self::open)
    pub fn set_path<P: Into<PathBuf>>(&mut self, path: P) {
        self.path = path.into();
    }

    /// Current options
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Sheet that lookups read from; `None` means the first sheet
    pub fn sheet_name(&self) -> Option<&str> {
        self.options.sheet_name.as_deref()
    }

    /// Read subsequent lookups from the named sheet
    pub fn set_sheet_name(&mut self, name: impl Into<String>) {
        self.options.sheet_name = Some(name.into());
    }

    /// Read subsequent lookups from the first sheet
    pub fn clear_sheet_name(&mut self) {
        self.options.sheet_name = None;
    }

    /// How coordinates are matched against stored rows and cells
    pub fn lookup_mode(&self) -> LookupMode {
        self.options.lookup_mode
    }

    pub fn set_lookup_mode(&mut self, mode: LookupMode) {
        self.options.lookup_mode = mode;
    }

    /// Open the workbook, releasing any workbook that is already open
    pub fn open(&mut self) -> Result<()> {
        self.close();
        self.workbook = Some(FileWorkbook::open(&self.path)?);
        Ok(())
    }

    /// Whether a workbook is currently open
    pub fn is_open(&self) -> bool {
        self.workbook.is_some()
    }

    /// Release the open workbook and its file handle
    ///
    /// Safe to call any number of times.
    pub fn close(&mut self) {
        if self.workbook.take().is_some() {
            log::debug!("Closed workbook {}", self.path.display());
        }
    }

    fn workbook(&mut self) -> Result<&mut FileWorkbook> {
        let workbook = match self.workbook.take() {
            Some(workbook) => workbook,
            None => FileWorkbook::open(&self.path)?,
        };
        Ok(self.workbook.insert(workbook))
    }

    /// Names of the declared sheets, in workbook order
    pub fn sheet_names(&mut self) -> Result<Vec<String>> {
        self.workbook()?.sheet_names()
    }

    /// Get the value at 1-based `(row, column)` on the current sheet
    ///
    /// Sheet problems are errors (see [`Error`](crate::Error)); anything
    /// wrong with the cell itself is `Ok(None)`.
    pub fn get_value(&mut self, row: i64, column: i64) -> Result<Option<String>> {
        let sheet_name = self.options.sheet_name.clone();
        let mode = self.options.lookup_mode;

        let workbook = self.workbook()?;
        let sheet = workbook.resolve_sheet(sheet_name.as_deref())?;
        Ok(workbook.get_value_with_mode(&sheet, row, column, mode))
    }

    /// Get the value at an A1-style reference on the current sheet
    pub fn get_value_by_reference(&mut self, reference: &str) -> Result<Option<String>> {
        let cell = CellRef::parse(reference)?;
        self.get_value(cell.row.into(), cell.column.into())
    }
}

impl Drop for CellReader {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for CellReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellReader")
            .field("path", &self.path)
            .field("options", &self.options)
            .field("open", &self.is_open())
            .finish()
    }
}
