//! CSV record parser.
//!
//! Reads a comma-delimited stream whose first line is a header row and
//! pushes one [`RawRecord`] per data row into a caller-supplied sink, in
//! input order. Fields are located by header name, so a conformant header
//! that declares the columns in a different order is tolerated; the header
//! is authoritative.

use crate::error::Result;
use crate::types::RawRecord;
use csv::{Reader, StringRecord};
use std::io::Read;

pub const REFERENCE_HEADER: &str = "Reference";
pub const ACCOUNT_NUMBER_HEADER: &str = "Account Number";
pub const DESCRIPTION_HEADER: &str = "Description";
pub const START_BALANCE_HEADER: &str = "Start Balance";
pub const MUTATION_HEADER: &str = "Mutation";
pub const END_BALANCE_HEADER: &str = "End Balance";

/// Column positions resolved from the header row. A column the header does
/// not declare resolves to `None`, which makes the field absent on every
/// record; that is a validation finding, not a structural failure.
struct HeaderIndex {
    reference: Option<usize>,
    account_number: Option<usize>,
    description: Option<usize>,
    start_balance: Option<usize>,
    mutation: Option<usize>,
    end_balance: Option<usize>,
}

impl HeaderIndex {
    fn from_headers(headers: &StringRecord) -> Self {
        let position = |name: &str| headers.iter().position(|header| header == name);
        Self {
            reference: position(REFERENCE_HEADER),
            account_number: position(ACCOUNT_NUMBER_HEADER),
            description: position(DESCRIPTION_HEADER),
            start_balance: position(START_BALANCE_HEADER),
            mutation: position(MUTATION_HEADER),
            end_balance: position(END_BALANCE_HEADER),
        }
    }

    fn extract(&self, row: &StringRecord) -> RawRecord {
        let field = |index: Option<usize>| {
            index
                .and_then(|i| row.get(i))
                .map(|value| value.to_string())
        };
        RawRecord {
            reference: field(self.reference),
            account_number: field(self.account_number),
            description: field(self.description),
            start_balance: field(self.start_balance),
            mutation: field(self.mutation),
            end_balance: field(self.end_balance),
        }
    }
}

/// Parse a CSV stream, calling `sink` once per record in input order.
///
/// The header row is consumed and not emitted. A stream that cannot be
/// tokenized as delimited text (I/O failure, non-rectangular rows from a
/// stray quote) fails structurally and aborts the batch.
///
/// # Examples
///
/// ```
/// use statement_validator::csv_format;
///
/// let data = "Reference,Account Number,Description,Start Balance,Mutation,End Balance\n\
///             123,NL91ABNA0417164300,Groceries,100.00,+50.00,150.00\n";
/// let mut count = 0;
/// csv_format::each_record(data.as_bytes(), |_record| count += 1)?;
/// assert_eq!(count, 1);
/// # Ok::<(), statement_validator::Error>(())
/// ```
pub fn each_record<R, F>(reader: R, mut sink: F) -> Result<()>
where
    R: Read,
    F: FnMut(RawRecord),
{
    let mut csv_reader = Reader::from_reader(reader);
    let index = HeaderIndex::from_headers(&csv_reader.headers()?.clone());

    for row in csv_reader.records() {
        let row = row?;
        sink(index.extract(&row));
    }

    Ok(())
}
