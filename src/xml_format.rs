//! XML record parser.
//!
//! Reads a document whose root element contains `<record>` children, each
//! carrying a `reference` attribute and scalar child elements
//! `accountNumber`, `description`, `startBalance`, `mutation` and
//! `endBalance`. Parsing is event-driven over a quick-xml reader with an
//! explicit state machine, so only one record is in flight at a time no
//! matter how large the document is.

use crate::error::{Error, Result};
use crate::types::RawRecord;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

const RECORD_ELEMENT: &[u8] = b"record";
const REFERENCE_ATTRIBUTE: &[u8] = b"reference";
const ACCOUNT_NUMBER_ELEMENT: &[u8] = b"accountNumber";
const DESCRIPTION_ELEMENT: &[u8] = b"description";
const START_BALANCE_ELEMENT: &[u8] = b"startBalance";
const MUTATION_ELEMENT: &[u8] = b"mutation";
const END_BALANCE_ELEMENT: &[u8] = b"endBalance";

/// Scalar child elements of a `<record>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    AccountNumber,
    Description,
    StartBalance,
    Mutation,
    EndBalance,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            ACCOUNT_NUMBER_ELEMENT => Some(Field::AccountNumber),
            DESCRIPTION_ELEMENT => Some(Field::Description),
            START_BALANCE_ELEMENT => Some(Field::StartBalance),
            MUTATION_ELEMENT => Some(Field::Mutation),
            END_BALANCE_ELEMENT => Some(Field::EndBalance),
            _ => None,
        }
    }

    fn assign(self, record: &mut RawRecord, value: String) {
        match self {
            Field::AccountNumber => record.account_number = Some(value),
            Field::Description => record.description = Some(value),
            Field::StartBalance => record.start_balance = Some(value),
            Field::Mutation => record.mutation = Some(value),
            Field::EndBalance => record.end_balance = Some(value),
        }
    }
}

/// Parser position within the document.
enum State {
    BetweenRecords,
    InRecord(RawRecord),
    InField(RawRecord, Field, String),
}

/// Parse an XML stream, calling `sink` once per `<record>` in document
/// order.
///
/// A missing `reference` attribute leaves the record's reference absent and
/// flows into validation as such; only unparsable markup (mismatched or
/// unclosed tags, invalid syntax) fails structurally. Elements other than
/// the known record fields are skipped.
///
/// # Examples
///
/// ```
/// use statement_validator::xml_format;
///
/// let data = r#"<records>
///   <record reference="123">
///     <accountNumber>NL91ABNA0417164300</accountNumber>
///     <description>Groceries</description>
///     <startBalance>100.00</startBalance>
///     <mutation>+50.00</mutation>
///     <endBalance>150.00</endBalance>
///   </record>
/// </records>"#;
/// let mut count = 0;
/// xml_format::each_record(data.as_bytes(), |_record| count += 1)?;
/// assert_eq!(count, 1);
/// # Ok::<(), statement_validator::Error>(())
/// ```
pub fn each_record<R, F>(reader: R, mut sink: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(RawRecord),
{
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.config_mut().trim_text(true);

    let mut state = State::BetweenRecords;
    let mut buf = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(start) => {
                state = match state {
                    State::BetweenRecords if start.name().as_ref() == RECORD_ELEMENT => {
                        State::InRecord(new_record(&start)?)
                    }
                    State::InRecord(record) => match Field::from_name(start.name().as_ref()) {
                        Some(field) => State::InField(record, field, String::new()),
                        None => State::InRecord(record),
                    },
                    other => other,
                };
            }
            Event::Empty(start) => {
                state = match state {
                    State::BetweenRecords if start.name().as_ref() == RECORD_ELEMENT => {
                        sink(new_record(&start)?);
                        State::BetweenRecords
                    }
                    State::InRecord(mut record) => {
                        if let Some(field) = Field::from_name(start.name().as_ref()) {
                            field.assign(&mut record, String::new());
                        }
                        State::InRecord(record)
                    }
                    other => other,
                };
            }
            Event::Text(text) => {
                if let State::InField(_, _, value) = &mut state {
                    value.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let State::InField(_, _, value) = &mut state {
                    value.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(end) => {
                state = match state {
                    State::InField(mut record, field, value) => {
                        field.assign(&mut record, value);
                        State::InRecord(record)
                    }
                    State::InRecord(record) if end.name().as_ref() == RECORD_ELEMENT => {
                        sink(record);
                        State::BetweenRecords
                    }
                    other => other,
                };
            }
            Event::Eof => {
                return match state {
                    State::BetweenRecords => Ok(()),
                    _ => Err(Error::Xml("unexpected end of document".to_string())),
                };
            }
            _ => {}
        }
        buf.clear();
    }
}

fn new_record(start: &BytesStart) -> Result<RawRecord> {
    let reference = match start
        .try_get_attribute(REFERENCE_ATTRIBUTE)
        .map_err(|e| Error::Xml(e.to_string()))?
    {
        Some(attribute) => Some(attribute.unescape_value()?.into_owned()),
        None => None,
    };
    Ok(RawRecord {
        reference,
        ..RawRecord::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect(data: &str) -> Result<Vec<RawRecord>> {
        let mut records = Vec::new();
        each_record(data.as_bytes(), |record| records.push(record))?;
        Ok(records)
    }

    #[test]
    fn test_parses_records_in_document_order() {
        let records = collect(
            r#"<records>
                 <record reference="123">
                   <accountNumber>NL91ABNA0417164300</accountNumber>
                   <description>Groceries</description>
                   <startBalance>100.00</startBalance>
                   <mutation>+50.00</mutation>
                   <endBalance>150.00</endBalance>
                 </record>
                 <record reference="456">
                   <accountNumber>DE89370400440532013000</accountNumber>
                   <description>Rent</description>
                   <startBalance>200.00</startBalance>
                   <mutation>-50.00</mutation>
                   <endBalance>150.00</endBalance>
                 </record>
               </records>"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            RawRecord {
                reference: Some("123".to_string()),
                account_number: Some("NL91ABNA0417164300".to_string()),
                description: Some("Groceries".to_string()),
                start_balance: Some("100.00".to_string()),
                mutation: Some("+50.00".to_string()),
                end_balance: Some("150.00".to_string()),
            }
        );
        assert_eq!(records[1].reference.as_deref(), Some("456"));
        assert_eq!(records[1].mutation.as_deref(), Some("-50.00"));
    }

    #[test]
    fn test_missing_reference_attribute_is_not_structural() {
        let records = collect(
            r#"<records>
                 <record>
                   <accountNumber>NL91ABNA0417164300</accountNumber>
                   <startBalance>100.00</startBalance>
                   <mutation>+50.00</mutation>
                   <endBalance>150.00</endBalance>
                 </record>
               </records>"#,
        )
        .unwrap();
        assert_eq!(records[0].reference, None);
    }

    #[test]
    fn test_missing_child_element_leaves_field_absent() {
        let records = collect(
            r#"<records>
                 <record reference="123">
                   <startBalance>100.00</startBalance>
                   <endBalance>150.00</endBalance>
                 </record>
               </records>"#,
        )
        .unwrap();
        assert_eq!(records[0].account_number, None);
        assert_eq!(records[0].mutation, None);
        assert_eq!(records[0].start_balance.as_deref(), Some("100.00"));
    }

    #[test]
    fn test_empty_element_is_present_but_blank() {
        let records = collect(
            r#"<records>
                 <record reference="123">
                   <mutation/>
                   <description></description>
                 </record>
               </records>"#,
        )
        .unwrap();
        assert_eq!(records[0].mutation.as_deref(), Some(""));
        assert_eq!(records[0].description.as_deref(), Some(""));
    }

    #[test]
    fn test_escaped_text_is_unescaped() {
        let records = collect(
            r#"<records>
                 <record reference="123">
                   <description>Tickets &amp; snacks</description>
                 </record>
               </records>"#,
        )
        .unwrap();
        assert_eq!(records[0].description.as_deref(), Some("Tickets & snacks"));
    }

    #[test]
    fn test_unknown_elements_are_skipped() {
        let records = collect(
            r#"<records>
                 <header>ignored</header>
                 <record reference="123">
                   <startBalance>100.00</startBalance>
                 </record>
               </records>"#,
        )
        .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_truncated_document_is_structural() {
        let result = collect(r#"<records><record reference="123"><mutation>+50.00"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_mismatched_tags_are_structural() {
        let result = collect(r#"<records><record reference="1"></wrong></records>"#);
        assert!(result.is_err());
    }
}
