//! Recursive structural comparison.
//!
//! The core entry point is [`compute_diff`], which walks two JSON documents
//! depth-first and produces an ordered list of [`DifferenceRecord`]s.

use crate::diff::model::{DifferenceKind, DifferenceRecord, Severity};
use crate::document::DocKind;
use crate::expected::is_expected_difference;
use serde_json::Value;
use std::collections::BTreeSet;

/// Compute a structured, deterministic diff between two documents.
///
/// The function is pure and side-effect-free. Object keys are visited in
/// sorted order (insertion order differs across two independently built
/// trees), so running it twice over the same inputs produces byte-identical
/// output.
pub fn compute_diff(left: &Value, right: &Value) -> Vec<DifferenceRecord> {
    let mut records = Vec::new();
    diff_node(left, right, "", &mut records);
    records
}

fn diff_node(left: &Value, right: &Value, path: &str, out: &mut Vec<DifferenceRecord>) {
    // Deep equality: nothing to report.
    if left == right {
        return;
    }

    let left_kind = DocKind::of(left);
    let right_kind = DocKind::of(right);

    // A type mismatch subsumes all nested differences; recursion stops here.
    if left_kind != right_kind {
        out.push(DifferenceRecord {
            path: path.to_string(),
            kind: DifferenceKind::TypeMismatch,
            left_value: Some(left.clone()),
            right_value: Some(right.clone()),
            left_type: Some(left_kind),
            right_type: Some(right_kind),
            severity: Severity::High,
            is_expected: false,
        });
        return;
    }

    match (left, right) {
        (Value::Object(left_map), Value::Object(right_map)) => {
            let keys: BTreeSet<&str> = left_map
                .keys()
                .chain(right_map.keys())
                .map(|k| k.as_str())
                .collect();
            for key in keys {
                let child_path = if path.is_empty() {
                    key.to_string()
                } else {
                    format!("{path}.{key}")
                };
                match (left_map.get(key), right_map.get(key)) {
                    (None, Some(right_child)) => out.push(absence_record(
                        child_path,
                        DifferenceKind::MissingInLeft,
                        None,
                        Some(right_child),
                    )),
                    (Some(left_child), None) => out.push(absence_record(
                        child_path,
                        DifferenceKind::MissingInRight,
                        Some(left_child),
                        None,
                    )),
                    (Some(left_child), Some(right_child)) => {
                        diff_node(left_child, right_child, &child_path, out)
                    }
                    (None, None) => {}
                }
            }
        }
        (Value::Array(left_items), Value::Array(right_items)) => {
            let max_len = left_items.len().max(right_items.len());
            for index in 0..max_len {
                let child_path = format!("{path}[{index}]");
                match (left_items.get(index), right_items.get(index)) {
                    (None, Some(right_child)) => out.push(absence_record(
                        child_path,
                        DifferenceKind::MissingInLeft,
                        None,
                        Some(right_child),
                    )),
                    (Some(left_child), None) => out.push(absence_record(
                        child_path,
                        DifferenceKind::MissingInRight,
                        Some(left_child),
                        None,
                    )),
                    (Some(left_child), Some(right_child)) => {
                        diff_node(left_child, right_child, &child_path, out)
                    }
                    (None, None) => {}
                }
            }
        }
        // `Value` equality distinguishes integer and float representations;
        // the comparison must not, so 1 and 1.0 are the same value.
        (Value::Number(left_num), Value::Number(right_num))
            if numbers_equal(left_num, right_num) => {}
        _ => {
            // Same-kind scalars with different values.
            let expected = is_expected_difference(
                path,
                DifferenceKind::ValueMismatch,
                Some(left),
                Some(right),
            );
            out.push(DifferenceRecord {
                path: path.to_string(),
                kind: DifferenceKind::ValueMismatch,
                left_value: Some(left.clone()),
                right_value: Some(right.clone()),
                left_type: Some(left_kind),
                right_type: Some(right_kind),
                severity: if expected {
                    Severity::Low
                } else {
                    Severity::Medium
                },
                is_expected: expected,
            })
        }
    }
}

/// Numeric equality across representations. Exact integer comparison where
/// both sides fit the same integer type, `f64` comparison otherwise.
fn numbers_equal(left: &serde_json::Number, right: &serde_json::Number) -> bool {
    if let (Some(l), Some(r)) = (left.as_i64(), right.as_i64()) {
        return l == r;
    }
    if let (Some(l), Some(r)) = (left.as_u64(), right.as_u64()) {
        return l == r;
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => l == r,
        _ => false,
    }
}

/// Build a record for a field present on only one side.
///
/// Field loss in the candidate (`missing_in_right`) starts at high severity
/// and downgrades to medium when expected; field gain (`missing_in_left`)
/// starts at medium and downgrades to low.
fn absence_record(
    path: String,
    kind: DifferenceKind,
    left_value: Option<&Value>,
    right_value: Option<&Value>,
) -> DifferenceRecord {
    let expected = is_expected_difference(&path, kind, left_value, right_value);
    let severity = match (kind, expected) {
        (DifferenceKind::MissingInRight, false) => Severity::High,
        (DifferenceKind::MissingInRight, true) => Severity::Medium,
        (_, false) => Severity::Medium,
        (_, true) => Severity::Low,
    };
    DifferenceRecord {
        path,
        kind,
        left_value: left_value.cloned(),
        right_value: right_value.cloned(),
        left_type: None,
        right_type: None,
        severity,
        is_expected: expected,
    }
}
