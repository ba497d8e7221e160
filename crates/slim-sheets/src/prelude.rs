//! Prelude module - common imports for slim-sheets users
//!
//! ```rust
//! use slim_sheets::prelude::*;
//! ```

pub use crate::{
    // Main types
    CellReader,
    CellRef,
    // Error types
    Error,
    LookupMode,
    ReaderOptions,
    Result,
};
