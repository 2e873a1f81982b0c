//! Difference record types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Output ordering is owned by the engine; these types carry no collections
//! that could reorder on serialization.

use crate::document::DocKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What kind of divergence a record describes.
///
/// The three error kinds are never produced by the structural walk; the
/// orchestrator appends them when a side fails at the transport or parse
/// level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    /// Corresponding nodes have different dynamic types
    TypeMismatch,
    /// Present in the candidate but absent from the baseline (additive)
    MissingInLeft,
    /// Present in the baseline but absent from the candidate (field loss)
    MissingInRight,
    /// Same type, different scalar value
    ValueMismatch,
    /// The baseline side failed at the transport or parse level
    LeftError,
    /// The candidate side failed at the transport or parse level
    RightError,
    /// Both sides failed at the transport or parse level
    BothErrors,
}

/// Per-record severity, assigned at creation and possibly downgraded once a
/// record is classified as expected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// One detected divergence between corresponding nodes of two documents.
///
/// Invariant: `is_expected == true` implies `severity` is never
/// [`Severity::High`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DifferenceRecord {
    /// Location of the divergence: dot-separated keys, bracketed indices
    /// (e.g. `items[2].id`). Empty for a root-level scalar mismatch.
    pub path: String,
    /// Kind of divergence
    pub kind: DifferenceKind,
    /// Value on the baseline side, if present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_value: Option<Value>,
    /// Value on the candidate side, if present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_value: Option<Value>,
    /// Baseline dynamic type (present for type/value mismatches)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_type: Option<DocKind>,
    /// Candidate dynamic type (present for type/value mismatches)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_type: Option<DocKind>,
    /// Severity of this record
    pub severity: Severity,
    /// True if the divergence is attributable to intentionally
    /// non-deterministic fields (generated IDs, timestamps)
    #[serde(default)]
    pub is_expected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_serializes_snake_case() {
        let s = serde_json::to_string(&DifferenceKind::MissingInRight).unwrap();
        assert_eq!(s, "\"missing_in_right\"");
        let s = serde_json::to_string(&DifferenceKind::TypeMismatch).unwrap();
        assert_eq!(s, "\"type_mismatch\"");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }

    #[test]
    fn test_record_round_trip() {
        let record = DifferenceRecord {
            path: "items[2].id".to_string(),
            kind: DifferenceKind::ValueMismatch,
            left_value: Some(json!(1)),
            right_value: Some(json!(2)),
            left_type: Some(crate::document::DocKind::Number),
            right_type: Some(crate::document::DocKind::Number),
            severity: Severity::Medium,
            is_expected: false,
        };
        let s = serde_json::to_string(&record).unwrap();
        let back: DifferenceRecord = serde_json::from_str(&s).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn test_absent_values_are_omitted() {
        let record = DifferenceRecord {
            path: "b".to_string(),
            kind: DifferenceKind::MissingInRight,
            left_value: Some(json!(2)),
            right_value: None,
            left_type: None,
            right_type: None,
            severity: Severity::High,
            is_expected: false,
        };
        let s = serde_json::to_string(&record).unwrap();
        assert!(!s.contains("right_value"));
        assert!(!s.contains("left_type"));
    }
}
