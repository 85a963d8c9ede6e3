//! Per-record validation rules.
//!
//! [`validate_record`] is a pure function from one raw record to its
//! [`RecordReport`]. Every rule is evaluated on every record; a failing rule
//! records an issue and never stops the rest of the rule set, so one bad
//! field still yields findings about the others. Cross-record rules
//! (duplicate references) live in [`crate::report`].

use crate::iban;
use crate::report::{RecordReport, ReferenceKey};
use crate::types::RawRecord;
use rust_decimal::Decimal;
use std::str::FromStr;

pub const REFERENCE_MISSING: &str = "Reference number is missing";
pub const IBAN_IS_NULL: &str = "IBAN is null";
pub const START_BALANCE_NULL: &str = "Start Balance is null";
pub const MUTATION_IS_EMPTY: &str = "Mutation is empty";
pub const MUTATION_START_CHAR: &str = "Mutation does not start with '+' or '-'";
pub const MUTATION_DECIMAL: &str = "Mutation is not a valid decimal value";
pub const END_BALANCE_NULL: &str = "End Balance is null";
pub const END_BALANCE_CALC_MISSING: &str =
    "End balance could not be calculated: Missing information.";

/// Validate a single record against the full rule set.
///
/// Issues appear in fixed rule order: reference, IBAN, start balance,
/// mutation, end balance, balance arithmetic.
///
/// # Examples
///
/// ```
/// use statement_validator::types::RawRecord;
/// use statement_validator::validator::validate_record;
///
/// let record = RawRecord {
///     reference: Some("123".into()),
///     account_number: Some("NL91ABNA0417164300".into()),
///     description: Some("Groceries".into()),
///     start_balance: Some("100.00".into()),
///     mutation: Some("+50.00".into()),
///     end_balance: Some("150.00".into()),
/// };
/// assert!(validate_record(&record).is_valid());
/// ```
pub fn validate_record(record: &RawRecord) -> RecordReport {
    let mut issues = Vec::new();

    let reference = validate_reference(record.reference.as_deref(), &mut issues);
    validate_iban(record.account_number.as_deref(), &mut issues);

    // Description is never validated.

    let start_balance = parse_decimal(record.start_balance.as_deref());
    if start_balance.is_none() {
        issues.push(START_BALANCE_NULL.to_string());
    }

    let mutation = validate_mutation(record.mutation.as_deref(), &mut issues);

    let end_balance = parse_decimal(record.end_balance.as_deref());
    if end_balance.is_none() {
        issues.push(END_BALANCE_NULL.to_string());
    }

    validate_balances(start_balance, mutation, end_balance, &mut issues);

    RecordReport::new(reference, issues)
}

/// A reference must be a non-negative integer of arbitrary magnitude.
/// The canonical key strips leading zeros so `0123` groups with `123`.
fn validate_reference(raw: Option<&str>, issues: &mut Vec<String>) -> ReferenceKey {
    let raw = match raw {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            issues.push(REFERENCE_MISSING.to_string());
            return ReferenceKey::Missing;
        }
    };

    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        issues.push(format!("Reference number is not valid: {}", raw));
        return ReferenceKey::Invalid(raw.to_string());
    }

    let canonical = raw.trim_start_matches('0');
    let canonical = if canonical.is_empty() { "0" } else { canonical };
    ReferenceKey::Valid(canonical.to_string())
}

fn validate_iban(raw: Option<&str>, issues: &mut Vec<String>) {
    match raw {
        Some(text) if !text.trim().is_empty() => {
            if !iban::is_well_formed(text) {
                issues.push(format!("'{}' is not a valid IBAN", text));
            }
        }
        _ => issues.push(IBAN_IS_NULL.to_string()),
    }
}

/// A mutation must carry an explicit `+`/`-` sign. A missing sign is
/// reported, but the text is still parsed as an unsigned decimal so the
/// balance arithmetic downstream can run when the digits themselves are
/// fine.
fn validate_mutation(raw: Option<&str>, issues: &mut Vec<String>) -> Option<Decimal> {
    let raw = raw.unwrap_or("");
    if raw.trim().is_empty() {
        issues.push(MUTATION_IS_EMPTY.to_string());
        return None;
    }

    let (remainder, negate) = match raw.as_bytes()[0] {
        b'+' => (&raw[1..], false),
        b'-' => (&raw[1..], true),
        _ => {
            issues.push(MUTATION_START_CHAR.to_string());
            (raw, false)
        }
    };

    match Decimal::from_str(remainder) {
        Ok(value) if negate => Some(-value),
        Ok(value) => Some(value),
        Err(_) => {
            issues.push(MUTATION_DECIMAL.to_string());
            None
        }
    }
}

fn parse_decimal(raw: Option<&str>) -> Option<Decimal> {
    Decimal::from_str(raw?).ok()
}

/// Exact decimal comparison of start + mutation against the declared end
/// balance. Monetary sums are never compared through binary floating point.
fn validate_balances(
    start_balance: Option<Decimal>,
    mutation: Option<Decimal>,
    end_balance: Option<Decimal>,
    issues: &mut Vec<String>,
) {
    match (start_balance, mutation, end_balance) {
        (Some(start), Some(mutation), Some(end)) => {
            let calculated = start + mutation;
            if calculated != end {
                issues.push(format!(
                    "End balance is not correct: ({} + {}) {} != {}",
                    start, mutation, calculated, end
                ));
            }
        }
        _ => issues.push(END_BALANCE_CALC_MISSING.to_string()),
    }
}
