//! Error types for the statement validator library.

use std::io;
use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading and tokenizing an input stream.
///
/// All variants are structural: they mean the input could not be parsed at
/// all and no report was produced. Per-record validation findings are never
/// represented here; they are ordinary data in the [`BatchReport`].
///
/// [`BatchReport`]: crate::report::BatchReport
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred while reading the input stream.
    #[error("Could not parse file: I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error tokenizing CSV input.
    #[error("Could not parse file: CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error tokenizing XML input.
    #[error("Could not parse file: XML error: {0}")]
    Xml(String),

    /// Unrecognized input format.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}
