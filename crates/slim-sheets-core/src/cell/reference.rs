//! A1-style cell references and base-26 column naming

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A 1-based cell coordinate (e.g. "BP183" is row 183, column 68)
///
/// Both indices are 1-based, matching what a user sees in a spreadsheet
/// application. They are unbounded above apart from the `u32` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRef {
    /// Row number (1-based)
    pub row: u32,
    /// Column number (1-based, A=1, Z=26, AA=27)
    pub column: u32,
}

impl CellRef {
    /// Create a new cell coordinate
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Parse a cell reference from A1-style notation
    ///
    /// The reference must be one or more ASCII letters followed by one or
    /// more ASCII digits. Letters are case-insensitive; surrounding
    /// whitespace is ignored.
    ///
    /// # Examples
    /// ```
    /// use slim_sheets_core::CellRef;
    ///
    /// let cell = CellRef::parse("O41").unwrap();
    /// assert_eq!(cell.row, 41);
    /// assert_eq!(cell.column, 15);
    ///
    /// assert!(CellRef::parse("$A$1").is_err());
    /// assert!(CellRef::parse("A0").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidReference("empty reference".into()));
        }

        let split = s
            .bytes()
            .position(|b| !b.is_ascii_alphabetic())
            .unwrap_or(s.len());

        if split == 0 {
            return Err(Error::InvalidReference(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let (letters, digits) = s.split_at(split);
        if digits.is_empty() {
            return Err(Error::InvalidReference(format!("no row number in '{}'", s)));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidReference(format!(
                "unexpected characters after row number in '{}'",
                s
            )));
        }

        let column = letters_to_column(letters)?;
        let row: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidReference(format!("row number too large in '{}'", s)))?;

        if row == 0 {
            return Err(Error::InvalidReference(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Ok(Self { row, column })
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", column_to_letters(self.column), self.row)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Convert a cell reference into a 1-based `(row, column)` pair
pub fn parse_cell_reference(s: &str) -> Result<(u32, u32)> {
    let cell = CellRef::parse(s)?;
    Ok((cell.row, cell.column))
}

/// Convert column letters to a 1-based column number (A = 1, Z = 26, AA = 27, etc.)
///
/// Letters are read most-significant first, each one contributing a digit
/// in 1..=26 to a positional base-26 number.
pub fn letters_to_column(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::InvalidReference("empty column letters".into()));
    }

    let mut column: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidReference(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        column = column
            .checked_mul(26)
            .and_then(|c| c.checked_add(digit))
            .ok_or_else(|| {
                Error::InvalidReference(format!("column '{}' too large", letters))
            })?;
    }

    Ok(column)
}

/// Convert a 1-based column number to letters (1 = A, 26 = Z, 27 = AA, etc.)
///
/// Column 0 has no letter form and yields an empty string.
pub fn column_to_letters(column: u32) -> String {
    let mut result = Vec::new();
    let mut n = column;

    while n > 0 {
        n -= 1;
        result.push((n % 26) as u8 + b'A');
        n /= 26;
    }

    result.reverse();
    // Only ASCII uppercase letters were pushed
    String::from_utf8(result).unwrap_or_default()
}
