//! Locating a single cell inside a worksheet part

use std::cmp::Ordering;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use slim_sheets_core::letters_to_column;

use crate::error::{XlsxError, XlsxResult};

/// How `(row, column)` coordinates are matched against the worksheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LookupMode {
    /// Match by ordinal position among the rows present in the sheet, then
    /// among the cells present in that row.
    ///
    /// Omitted rows and cells do not reserve a slot: a row whose first two
    /// stored cells are C1 and E1 answers column 1 with C1 and column 2 with
    /// E1. Coordinates only line up with A1 references when nothing before
    /// the target has been left out.
    #[default]
    Positional,
    /// Match by the `r` attributes stored on rows and cells, so "C1" is
    /// always column 3 of row 1 regardless of what precedes it.
    Declared,
}

/// A resolved sheet ready for lookups
///
/// Holds only part locations; rows and cells are read on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetData {
    pub(crate) name: String,
    pub(crate) part: String,
    pub(crate) shared_strings: Option<String>,
}

impl SheetData {
    /// Declared sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Archive path of the worksheet part
    pub fn part(&self) -> &str {
        &self.part
    }
}

/// A `<c>` element as stored in the worksheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCell {
    /// The `r` attribute, e.g. "C3"
    pub reference: Option<String>,
    /// The `t` attribute, e.g. "s" for shared strings
    pub cell_type: Option<String>,
    /// Whether the cell carries a formula
    pub has_formula: bool,
    /// Concatenated value text (`<v>` and inline `<t>`), formula text excluded
    pub text: String,
}

impl RawCell {
    fn from_start(e: &BytesStart<'_>) -> Self {
        let mut cell = RawCell::default();
        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"r" => cell.reference = attr.unescape_value().ok().map(|s| s.to_string()),
                b"t" => cell.cell_type = attr.unescape_value().ok().map(|s| s.to_string()),
                _ => {}
            }
        }
        cell
    }

    /// Index into the shared string table, if this cell stores one
    ///
    /// Formula cells never resolve. Otherwise any text that parses as an
    /// integer is taken as an index, matching how the value is read
    /// regardless of the declared cell type.
    pub fn shared_string_index(&self) -> Option<usize> {
        if self.has_formula {
            return None;
        }
        let index: i64 = self.text.trim().parse().ok()?;
        usize::try_from(index).ok()
    }
}

/// Tracks the row or column number assigned to successive elements
#[derive(Debug, Default)]
struct Ordinal {
    last: u32,
}

impl Ordinal {
    fn advance(&mut self, mode: LookupMode, declared: Option<u32>) -> u32 {
        let next = match (mode, declared) {
            (LookupMode::Declared, Some(n)) => n,
            _ => self.last.saturating_add(1),
        };
        self.last = next;
        next
    }
}

fn declared_row(e: &BytesStart<'_>) -> Option<u32> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"r")
        .and_then(|attr| attr.unescape_value().ok()?.trim().parse().ok())
}

fn declared_column(e: &BytesStart<'_>) -> Option<u32> {
    let attr = e
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"r")?;
    let reference = attr.unescape_value().ok()?;
    let letters: String = reference
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    letters_to_column(&letters).ok()
}

/// Text collection state while inside the target `<c>`
#[derive(Debug)]
struct CellCapture {
    cell: RawCell,
    in_formula: bool,
    in_phonetic: bool,
    in_text: bool,
}

impl CellCapture {
    fn new(cell: RawCell) -> Self {
        Self {
            cell,
            in_formula: false,
            in_phonetic: false,
            in_text: false,
        }
    }

    fn enter(&mut self, name: &[u8]) {
        match name {
            b"f" => {
                self.cell.has_formula = true;
                self.in_formula = true;
            }
            b"rPh" => self.in_phonetic = true,
            b"v" | b"t" => self.in_text = true,
            _ => {}
        }
    }

    fn leave(&mut self, name: &[u8]) {
        match name {
            b"f" => self.in_formula = false,
            b"rPh" => self.in_phonetic = false,
            b"v" | b"t" => self.in_text = false,
            _ => {}
        }
    }

    fn collecting(&self) -> bool {
        self.in_text && !self.in_formula && !self.in_phonetic
    }
}

/// Check whether a worksheet part has a `<sheetData>` element
pub(crate) fn has_sheet_data<B: BufRead>(xml_reader: &mut Reader<B>) -> XlsxResult<bool> {
    let mut buf = Vec::new();
    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheetData" => {
                return Ok(true)
            }
            Event::Eof => return Ok(false),
            _ => {}
        }
        buf.clear();
    }
}

/// Stream a worksheet part until the cell at `(row, column)` is found
///
/// Both coordinates are 1-based. Returns `Ok(None)` as soon as the sheet is
/// known not to contain the cell; nothing after the target is read.
pub(crate) fn locate_cell<B: BufRead>(
    xml_reader: &mut Reader<B>,
    row: u32,
    column: u32,
    mode: LookupMode,
) -> XlsxResult<Option<RawCell>> {
    xml_reader.trim_text(false);

    let mut buf = Vec::new();
    let mut in_sheet_data = false;
    let mut in_target_row = false;
    let mut rows = Ordinal::default();
    let mut cells = Ordinal::default();
    let mut capture: Option<CellCapture> = None;

    loop {
        buf.clear();
        let event = xml_reader.read_event_into(&mut buf)?;

        if let Some(current) = capture.as_mut() {
            match event {
                Event::Start(e) => current.enter(e.local_name().as_ref()),
                Event::Empty(e) => {
                    if e.local_name().as_ref() == b"f" {
                        current.cell.has_formula = true;
                    }
                }
                Event::Text(t) if current.collecting() => {
                    current.cell.text.push_str(&t.unescape()?);
                }
                Event::CData(t) if current.collecting() => {
                    current.cell.text.push_str(&String::from_utf8_lossy(&t));
                }
                Event::End(e) => {
                    if e.local_name().as_ref() == b"c" {
                        return Ok(capture.map(|c| c.cell));
                    }
                    current.leave(e.local_name().as_ref());
                }
                Event::Eof => {
                    return Err(XlsxError::Corrupt(
                        "worksheet ended inside a cell".into(),
                    ))
                }
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                match e.local_name().as_ref() {
                    b"sheetData" => {
                        if is_empty {
                            return Ok(None);
                        }
                        in_sheet_data = true;
                    }
                    b"row" if in_sheet_data => {
                        match rows.advance(mode, declared_row(e)).cmp(&row) {
                            Ordering::Equal if is_empty => return Ok(None),
                            Ordering::Equal => in_target_row = true,
                            Ordering::Greater => return Ok(None),
                            Ordering::Less => {}
                        }
                    }
                    b"c" if in_target_row => {
                        match cells.advance(mode, declared_column(e)).cmp(&column) {
                            Ordering::Equal => {
                                let cell = RawCell::from_start(e);
                                if is_empty {
                                    return Ok(Some(cell));
                                }
                                capture = Some(CellCapture::new(cell));
                            }
                            Ordering::Greater => return Ok(None),
                            Ordering::Less => {}
                        }
                    }
                    _ => {}
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"row" if in_target_row => return Ok(None),
                b"sheetData" => return Ok(None),
                _ => {}
            },
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}
