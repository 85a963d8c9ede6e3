//! Statement Validator Library
//!
//! A library for validating batches of bank-statement records submitted as
//! CSV or XML streams.
//!
//! # Supported Formats
//!
//! - **CSV**: header row `Reference, Account Number, Description,
//!   Start Balance, Mutation, End Balance`, comma-delimited
//! - **XML**: root element containing `<record>` children with a
//!   `reference` attribute and scalar field elements
//!
//! # Features
//!
//! - Streaming, event-driven parsing of both formats
//! - Per-record rule validation (reference format, IBAN well-formedness,
//!   decimal balances, signed mutations, exact balance arithmetic)
//! - Cross-record duplicate-reference detection over the whole batch
//! - An error report keyed by reference, with clean records filtered out
//!
//! # Examples
//!
//! ```
//! use statement_validator::{engine, Format};
//!
//! let data = "Reference,Account Number,Description,Start Balance,Mutation,End Balance\n\
//!             456,BADIBAN,desc,100.00,+50.00,150.00\n";
//! let report = engine::validate(data.as_bytes(), Format::Csv)?;
//! assert!(report.get("456").unwrap()[0].issues[0].contains("not a valid IBAN"));
//! # Ok::<(), statement_validator::Error>(())
//! ```

pub mod csv_format;
pub mod engine;
pub mod error;
pub mod iban;
pub mod report;
pub mod types;
pub mod validator;
pub mod xml_format;

use std::path::Path;
use std::str::FromStr;

// Re-export commonly used types
pub use error::{Error, Result};
pub use report::{BatchReport, RecordReport, ReferenceKey};
pub use types::RawRecord;

/// Supported input formats.
///
/// The engine never sniffs content: the caller declares the format, and an
/// unrecognized one is rejected before the engine is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Comma-separated values with a header row.
    Csv,
    /// XML document of `<record>` elements.
    Xml,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "xml" => Ok(Format::Xml),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

impl Format {
    /// Get file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Xml => "xml",
        }
    }

    /// Detect the format from a file name's extension, case-insensitively.
    pub fn from_filename(name: &str) -> Option<Self> {
        let extension = Path::new(name).extension()?.to_str()?;
        match extension.to_lowercase().as_str() {
            "csv" => Some(Format::Csv),
            "xml" => Some(Format::Xml),
            _ => None,
        }
    }
}
