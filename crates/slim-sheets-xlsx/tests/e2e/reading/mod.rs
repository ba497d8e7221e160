//! Reading tests - verify lookups against generated workbooks.

mod open;
