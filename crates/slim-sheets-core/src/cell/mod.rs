//! Cell addressing

mod reference;

pub use reference::{column_to_letters, letters_to_column, parse_cell_reference, CellRef};
