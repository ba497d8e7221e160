//! Reader configuration

use slim_sheets_xlsx::LookupMode;

/// Options for a [`CellReader`](crate::CellReader)
///
/// Both fields can also be changed on the reader after construction; the
/// current values are read on every lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ReaderOptions {
    /// Sheet to read from; `None` means the first sheet
    pub sheet_name: Option<String>,
    /// How coordinates are matched against stored rows and cells
    pub lookup_mode: LookupMode,
}

impl ReaderOptions {
    /// Create options with the defaults (first sheet, positional lookup)
    pub fn new() -> Self {
        Self::default()
    }

    /// Read from the named sheet
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = Some(name.into());
        self
    }

    /// Use `mode` to match coordinates
    pub fn lookup_mode(mut self, mode: LookupMode) -> Self {
        self.lookup_mode = mode;
        self
    }
}
