//! Validation report types and batch aggregation.
//!
//! A validated record becomes a [`RecordReport`]; the full batch is grouped
//! by reference into a [`BatchReport`], which is where cross-record
//! duplicate detection and clean-group filtering happen.

use serde::ser::{SerializeMap, SerializeStruct, Serializer};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Grouping key derived from a record's reference field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReferenceKey {
    /// A well-formed reference number in canonical form (leading zeros
    /// stripped), so `0123` and `123` group together.
    Valid(String),
    /// Reference text that does not parse as a non-negative integer,
    /// kept verbatim.
    Invalid(String),
    /// No reference was present in the input.
    Missing,
}

impl ReferenceKey {
    /// The key as it appears in the serialized report.
    pub fn as_str(&self) -> &str {
        match self {
            ReferenceKey::Valid(text) | ReferenceKey::Invalid(text) => text,
            ReferenceKey::Missing => "",
        }
    }
}

impl fmt::Display for ReferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation outcome for a single record.
///
/// The issue list is in rule-evaluation order: reference, IBAN, start
/// balance, mutation, end balance, balance arithmetic, and finally the
/// duplicate-reference issue added during aggregation. An empty list means
/// the record is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordReport {
    /// Key the record is grouped under.
    pub reference: ReferenceKey,

    /// Ordered validation issues found on this record.
    pub issues: Vec<String>,
}

impl RecordReport {
    /// Create a report for one record.
    pub fn new(reference: ReferenceKey, issues: Vec<String>) -> Self {
        Self { reference, issues }
    }

    /// A record is valid when no rule produced an issue.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

impl Serialize for RecordReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // The reference is carried by the enclosing report map, so only the
        // issue list is emitted here.
        let mut state = serializer.serialize_struct("RecordReport", 1)?;
        state.serialize_field("errors", &self.issues)?;
        state.end()
    }
}

/// Per-batch error report: reference key to the records grouped under it.
///
/// Keys appear in first-seen input order, records within a group in input
/// order. Every retained group consists solely of records with at least one
/// issue; fully clean groups are filtered out during aggregation.
///
/// Serializes as a JSON object keyed by reference text, each value an array
/// of `{"errors": [...]}` objects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    groups: Vec<(ReferenceKey, Vec<RecordReport>)>,
}

impl BatchReport {
    /// Build the report from the ordered per-record validation results.
    ///
    /// Groups by reference key preserving first-seen key order, appends a
    /// duplicate-reference issue to every member of a multi-record group
    /// under a valid key, then drops every group whose members are all
    /// issue-free. Records without a well-formed reference are grouped for
    /// reporting but never duplicate-marked against each other.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RecordReport>,
    {
        let mut groups: Vec<(ReferenceKey, Vec<RecordReport>)> = Vec::new();
        let mut index: HashMap<ReferenceKey, usize> = HashMap::new();

        for record in records {
            match index.get(&record.reference) {
                Some(&slot) => groups[slot].1.push(record),
                None => {
                    index.insert(record.reference.clone(), groups.len());
                    let key = record.reference.clone();
                    groups.push((key, vec![record]));
                }
            }
        }

        for (key, group) in &mut groups {
            if group.len() > 1 {
                if let ReferenceKey::Valid(text) = key {
                    let issue = format!("Reference {} is duplicated.", text);
                    for record in group.iter_mut() {
                        record.issues.push(issue.clone());
                    }
                }
            }
        }

        groups.retain(|(_, group)| group.iter().all(|record| !record.is_valid()));

        BatchReport { groups }
    }

    /// Look up the group reported under `reference`.
    pub fn get(&self, reference: &str) -> Option<&[RecordReport]> {
        self.groups
            .iter()
            .find(|(key, _)| key.as_str() == reference)
            .map(|(_, group)| group.as_slice())
    }

    /// Iterate groups in first-seen input order.
    pub fn iter(&self) -> impl Iterator<Item = (&ReferenceKey, &[RecordReport])> {
        self.groups
            .iter()
            .map(|(key, group)| (key, group.as_slice()))
    }

    /// Number of reference groups in the report.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when the whole batch validated clean.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Serialize for BatchReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (key, group) in &self.groups {
            map.serialize_entry(key.as_str(), group)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid(reference: &str) -> RecordReport {
        RecordReport::new(ReferenceKey::Valid(reference.to_string()), Vec::new())
    }

    fn invalid(reference: &str, issue: &str) -> RecordReport {
        RecordReport::new(
            ReferenceKey::Valid(reference.to_string()),
            vec![issue.to_string()],
        )
    }

    #[test]
    fn test_clean_groups_are_filtered() {
        let report = BatchReport::from_records(vec![valid("1"), invalid("2", "bad"), valid("3")]);
        assert_eq!(report.len(), 1);
        assert!(report.get("1").is_none());
        assert_eq!(report.get("2").unwrap()[0].issues, vec!["bad".to_string()]);
    }

    #[test]
    fn test_duplicates_are_marked_even_when_otherwise_valid() {
        let report = BatchReport::from_records(vec![valid("789"), invalid("1", "bad"), valid("789")]);
        let group = report.get("789").unwrap();
        assert_eq!(group.len(), 2);
        for record in group {
            assert_eq!(record.issues, vec!["Reference 789 is duplicated.".to_string()]);
        }
    }

    #[test]
    fn test_duplicate_issue_appended_after_existing_issues() {
        let report = BatchReport::from_records(vec![invalid("5", "bad"), valid("5")]);
        let group = report.get("5").unwrap();
        assert_eq!(
            group[0].issues,
            vec!["bad".to_string(), "Reference 5 is duplicated.".to_string()]
        );
        assert_eq!(group[1].issues, vec!["Reference 5 is duplicated.".to_string()]);
    }

    #[test]
    fn test_missing_references_are_not_mutual_duplicates() {
        let record = |issue: &str| RecordReport::new(ReferenceKey::Missing, vec![issue.to_string()]);
        let report = BatchReport::from_records(vec![record("no reference"), record("no reference")]);
        let group = report.get("").unwrap();
        assert_eq!(group.len(), 2);
        for member in group {
            assert_eq!(member.issues, vec!["no reference".to_string()]);
        }
    }

    #[test]
    fn test_first_seen_key_order() {
        let report = BatchReport::from_records(vec![
            invalid("30", "a"),
            invalid("10", "b"),
            invalid("30", "c"),
            invalid("20", "d"),
        ]);
        let keys: Vec<&str> = report.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["30", "10", "20"]);
    }

    #[test]
    fn test_serializes_as_map_of_error_lists() {
        let report = BatchReport::from_records(vec![invalid("456", "'BAD' is not a valid IBAN")]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"456": [{"errors": ["'BAD' is not a valid IBAN"]}]})
        );
    }
}
