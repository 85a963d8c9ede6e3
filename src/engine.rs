//! Engine facade: parse, validate, aggregate.
//!
//! One invocation consumes one input stream and produces one
//! [`BatchReport`]. Raw records stream straight from the parser into the
//! validator, so only the per-record reports are retained for the batch
//! (duplicate detection needs all of them). A structural parse failure
//! aborts the invocation with no partial report.

use crate::csv_format;
use crate::error::Result;
use crate::report::BatchReport;
use crate::types::RawRecord;
use crate::validator;
use crate::xml_format;
use crate::Format;
use std::io::{BufReader, Read};

/// Validate a batch of records read from `reader` in the given format.
///
/// The reader is fully consumed and dropped on every exit path. Validation
/// findings are data in the returned report; only a stream that cannot be
/// tokenized at all produces an `Err`.
///
/// # Examples
///
/// ```
/// use statement_validator::{engine, Format};
///
/// let data = "Reference,Account Number,Description,Start Balance,Mutation,End Balance\n\
///             123,NL91ABNA0417164300,Groceries,100.00,+50.00,150.00\n";
/// let report = engine::validate(data.as_bytes(), Format::Csv)?;
/// assert!(report.is_empty());
/// # Ok::<(), statement_validator::Error>(())
/// ```
pub fn validate<R: Read>(reader: R, format: Format) -> Result<BatchReport> {
    let mut reports = Vec::new();
    let sink = |raw: RawRecord| reports.push(validator::validate_record(&raw));

    match format {
        Format::Csv => csv_format::each_record(reader, sink)?,
        Format::Xml => xml_format::each_record(BufReader::new(reader), sink)?,
    }

    Ok(BatchReport::from_records(reports))
}
