//! Common types shared by the CSV and XML record parsers.

/// One raw bank-statement record as it appears in the input, before any
/// validation has run.
///
/// Every field is kept as the original text: deciding whether a balance
/// parses as a number or an account number is a well-formed IBAN is the
/// validator's job, not the parser's. `None` means the field was absent from the input (a
/// missing XML child element or a missing CSV column); present-but-empty
/// text is `Some("")`.
///
/// Raw records are transient: a parser produces them one at a time and the
/// engine consumes each immediately, so a batch never holds more than one
/// raw record in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// Record reference number, expected to be a non-negative integer.
    pub reference: Option<String>,

    /// Account number, expected to be an IBAN.
    pub account_number: Option<String>,

    /// Free-form description. Never validated.
    pub description: Option<String>,

    /// Balance at the start of the record's period.
    pub start_balance: Option<String>,

    /// Signed balance mutation, expected to start with `+` or `-`.
    pub mutation: Option<String>,

    /// Balance at the end of the record's period.
    pub end_balance: Option<String>,
}
