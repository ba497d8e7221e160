//! XLSX cell reader

mod shared_strings;
mod sheet;
mod workbook;

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::reader::Reader;
use slim_sheets_core::CellRef;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{XlsxError, XlsxResult};
use crate::package::{self, CONTENT_TYPES};

pub use sheet::{LookupMode, RawCell, SheetData};
pub use workbook::SheetEntry;

use shared_strings::lookup_shared_string;
use sheet::{has_sheet_data, locate_cell};
use workbook::{read_layout, WorkbookLayout};

/// A workbook opened from disk
pub type FileWorkbook = XlsxWorkbook<BufReader<File>>;

/// An open XLSX workbook
///
/// Owns the ZIP archive and the byte stream behind it; dropping the
/// workbook releases both. Every lookup takes `&mut self` because reading a
/// part moves the archive cursor. The type does no internal locking: share
/// it between threads only behind external synchronization.
pub struct XlsxWorkbook<R: Read + Seek> {
    archive: ZipArchive<R>,
    workbook_part: String,
}

impl XlsxWorkbook<BufReader<File>> {
    /// Open a workbook from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> XlsxResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => XlsxError::NotFound(path.to_path_buf()),
            _ => XlsxError::Io(e),
        })?;

        let workbook = Self::from_reader(BufReader::new(file))?;
        log::debug!("Opened workbook {}", path.display());
        Ok(workbook)
    }
}

impl<R: Read + Seek> XlsxWorkbook<R> {
    /// Open a workbook from a reader
    pub fn from_reader(reader: R) -> XlsxResult<Self> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| XlsxError::Corrupt(format!("not a ZIP package: {}", e)))?;

        // Verify this is an OPC package
        if !package::has_part(&archive, CONTENT_TYPES) {
            return Err(XlsxError::Corrupt(format!("missing {}", CONTENT_TYPES)));
        }

        let workbook_part = package::find_workbook_part(&mut archive)?
            .ok_or_else(|| XlsxError::Corrupt("missing workbook part".into()))?;

        Ok(Self {
            archive,
            workbook_part,
        })
    }

    /// Consume the workbook and return the underlying reader
    pub fn into_inner(self) -> R {
        self.archive.into_inner()
    }

    /// List the declared sheets in document order
    pub fn sheets(&mut self) -> XlsxResult<Vec<SheetEntry>> {
        Ok(self.layout()?.sheets)
    }

    /// List the declared sheet names in document order
    pub fn sheet_names(&mut self) -> XlsxResult<Vec<String>> {
        Ok(self.sheets()?.into_iter().map(|s| s.name).collect())
    }

    fn layout(&mut self) -> XlsxResult<WorkbookLayout> {
        read_layout(&mut self.archive, &self.workbook_part)
    }

    /// Resolve the sheet to read from
    ///
    /// With no name (or an empty one) the first declared sheet is used and
    /// must have a `<sheetData>` element, otherwise [`XlsxError::NoSheetData`].
    /// A name is matched case-insensitively against the declared sheets in
    /// document order; no match is [`XlsxError::SheetNotFound`].
    ///
    /// Nothing is cached, so callers can switch sheets between lookups.
    pub fn resolve_sheet(&mut self, name: Option<&str>) -> XlsxResult<SheetData> {
        let WorkbookLayout {
            sheets,
            shared_strings,
        } = self.layout()?;

        let entry = match name.filter(|n| !n.is_empty()) {
            None => sheets.into_iter().next().ok_or(XlsxError::NoSheetData)?,
            Some(name) => {
                let wanted = name.to_lowercase();
                sheets
                    .into_iter()
                    .find(|s| s.name.to_lowercase() == wanted)
                    .ok_or_else(|| XlsxError::SheetNotFound(name.to_string()))?
            }
        };

        let part = entry.part.ok_or_else(|| {
            XlsxError::Corrupt(format!(
                "sheet '{}' has no part for relationship {}",
                entry.name, entry.relationship_id
            ))
        })?;

        let has_data = {
            let file = self
                .archive
                .by_name(&part)
                .map_err(|_| XlsxError::Corrupt(format!("missing sheet part {}", part)))?;
            let mut xml_reader = Reader::from_reader(BufReader::new(file));
            has_sheet_data(&mut xml_reader)?
        };
        if !has_data {
            return Err(XlsxError::NoSheetData);
        }

        log::debug!("Resolved sheet '{}' to {}", entry.name, part);
        Ok(SheetData {
            name: entry.name,
            part,
            shared_strings,
        })
    }

    /// Get the value of the cell at 1-based `(row, column)`, by position
    ///
    /// Returns `None` for coordinates below 1, for rows or cells past the
    /// end of the sheet, for formula cells and for anything that does not
    /// resolve through the shared string table. See [`LookupMode::Positional`].
    pub fn get_value(&mut self, sheet: &SheetData, row: i64, column: i64) -> Option<String> {
        self.get_value_with_mode(sheet, row, column, LookupMode::Positional)
    }

    /// Get the value of the cell at 1-based `(row, column)` using `mode`
    pub fn get_value_with_mode(
        &mut self,
        sheet: &SheetData,
        row: i64,
        column: i64,
        mode: LookupMode,
    ) -> Option<String> {
        if row < 1 || column < 1 {
            return None;
        }
        let (Ok(row), Ok(column)) = (u32::try_from(row), u32::try_from(column)) else {
            return None;
        };

        match self.read_value(sheet, row, column, mode) {
            Ok(value) => value,
            Err(e) => {
                log::warn!(
                    "Treating cell ({}, {}) on sheet '{}' as empty: {}",
                    row,
                    column,
                    sheet.name,
                    e
                );
                None
            }
        }
    }

    /// Get the value of the cell at an A1-style reference, by position
    pub fn get_value_by_reference(
        &mut self,
        sheet: &SheetData,
        reference: &str,
    ) -> XlsxResult<Option<String>> {
        self.get_value_by_reference_with_mode(sheet, reference, LookupMode::Positional)
    }

    /// Get the value of the cell at an A1-style reference using `mode`
    pub fn get_value_by_reference_with_mode(
        &mut self,
        sheet: &SheetData,
        reference: &str,
        mode: LookupMode,
    ) -> XlsxResult<Option<String>> {
        let cell = CellRef::parse(reference)?;
        Ok(self.get_value_with_mode(sheet, cell.row.into(), cell.column.into(), mode))
    }

    /// Read the raw `<c>` element at 1-based `(row, column)`
    pub fn raw_cell(
        &mut self,
        sheet: &SheetData,
        row: u32,
        column: u32,
        mode: LookupMode,
    ) -> XlsxResult<Option<RawCell>> {
        let file = self.archive.by_name(&sheet.part)?;
        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        locate_cell(&mut xml_reader, row, column, mode)
    }

    fn read_value(
        &mut self,
        sheet: &SheetData,
        row: u32,
        column: u32,
        mode: LookupMode,
    ) -> XlsxResult<Option<String>> {
        let Some(cell) = self.raw_cell(sheet, row, column, mode)? else {
            return Ok(None);
        };
        let Some(index) = cell.shared_string_index() else {
            return Ok(None);
        };
        let Some(path) = sheet.shared_strings.as_deref() else {
            return Ok(None);
        };

        let file = match self.archive.by_name(path) {
            Ok(f) => f,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        lookup_shared_string(&mut xml_reader, index)
    }
}
