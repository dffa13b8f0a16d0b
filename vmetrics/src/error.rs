//! Errors produced while fixing font metrics.

use thiserror::Error;
use write_fonts::{read::ReadError, types::Tag};

/// An error that aborts a metrics fix.
#[derive(Debug, Clone, Error)]
pub enum FixError {
    #[error("Error reading font data: {0}")]
    Decode(ReadError),

    #[error("Required table '{0}' is missing")]
    MissingTable(Tag),

    #[error("Value {value} does not fit in {field}")]
    FieldOverflow { field: &'static str, value: i32 },

    #[error("Error encoding font data: {0}")]
    Encode(ReadError),
}
