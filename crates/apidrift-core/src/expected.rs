//! Expected-difference heuristics.
//!
//! A harness comparing two live API versions would be swamped by false
//! positives from generated fields. These rules decide whether a specific
//! path or value pair is an *expected* (non-regression) difference. Each
//! rule is evaluated independently; any rule matching makes the difference
//! expected.

use crate::diff::model::DifferenceKind;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Path suffixes (matched on the lowercased path) that mark generated
/// fields: identifiers and timestamps. `createdat`/`updatedat` are the
/// lowercased camelCase variants.
const GENERATED_PATH_SUFFIXES: &[&str] = &[
    "id",
    "uuid",
    "_id",
    "created_at",
    "updated_at",
    "createdat",
    "updatedat",
    "timestamp",
    "time",
    "date",
];

/// Epoch-seconds floor for the numeric-timestamp rule (2001-09-09).
const EPOCH_FLOOR: f64 = 1_000_000_000.0;

/// Maximum clock skew, in seconds, tolerated between two numeric timestamps.
const EPOCH_SKEW_SECONDS: f64 = 3600.0;

/// Decide whether a difference at `path` with the given kind and value pair
/// is expected (attributable to generated IDs, timestamps, or clock skew).
///
/// Rules, any true making the difference expected:
/// 1. the lowercased path ends with a generated-field suffix (applies to
///    value mismatches and to missing fields alike);
/// 2. both values are strings in canonical 8-4-4-4-12 UUID shape;
/// 3. both values are strings independently parseable as ISO-8601
///    datetimes (trailing `Z` treated as UTC offset);
/// 4. both values are numbers above 1e9 within one hour of each other.
pub fn is_expected_difference(
    path: &str,
    kind: DifferenceKind,
    left: Option<&Value>,
    right: Option<&Value>,
) -> bool {
    if matches!(
        kind,
        DifferenceKind::ValueMismatch
            | DifferenceKind::MissingInLeft
            | DifferenceKind::MissingInRight
    ) && path_names_generated_field(path)
    {
        return true;
    }

    // Value-shape rules need both sides present.
    let (Some(left), Some(right)) = (left, right) else {
        return false;
    };

    if let (Value::String(l), Value::String(r)) = (left, right) {
        if is_canonical_uuid(l) && is_canonical_uuid(r) {
            return true;
        }
        if parses_as_iso8601(l) && parses_as_iso8601(r) {
            return true;
        }
    }

    if let (Some(l), Some(r)) = (left.as_f64(), right.as_f64()) {
        if l > EPOCH_FLOOR && r > EPOCH_FLOOR && (l - r).abs() < EPOCH_SKEW_SECONDS {
            return true;
        }
    }

    false
}

/// True if the lowercased path ends with (or equals) a generated-field
/// suffix.
fn path_names_generated_field(path: &str) -> bool {
    let lowered = path.to_ascii_lowercase();
    GENERATED_PATH_SUFFIXES
        .iter()
        .any(|suffix| lowered.ends_with(suffix))
}

/// Canonical hyphenated 8-4-4-4-12 hexadecimal UUID, case-insensitive.
/// Braced, URN, and compact forms are deliberately rejected.
fn is_canonical_uuid(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, &c)| match i {
        8 | 13 | 18 | 23 => c == b'-',
        _ => c.is_ascii_hexdigit(),
    })
}

/// ISO-8601 datetime, with the same tolerance as the classic
/// `fromisoformat` check: full RFC 3339 (including `Z`), bare datetime, or
/// bare date.
fn parses_as_iso8601(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || s.parse::<NaiveDateTime>().is_ok()
        || s.parse::<NaiveDate>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KIND: DifferenceKind = DifferenceKind::ValueMismatch;

    #[test]
    fn test_path_suffix_marks_expected() {
        let l = json!("a");
        let r = json!("b");
        assert!(is_expected_difference("id", KIND, Some(&l), Some(&r)));
        assert!(is_expected_difference("user.created_at", KIND, Some(&l), Some(&r)));
        assert!(is_expected_difference("items[0].updatedAt", KIND, Some(&l), Some(&r)));
        assert!(is_expected_difference("ORDER_ID", KIND, Some(&l), Some(&r)));
        assert!(!is_expected_difference("name", KIND, Some(&l), Some(&r)));
    }

    #[test]
    fn test_path_suffix_is_a_plain_suffix_match() {
        // "valid" ends with "id": suffix semantics, same as the historical
        // pattern table.
        let l = json!("a");
        let r = json!("b");
        assert!(is_expected_difference("valid", KIND, Some(&l), Some(&r)));
    }

    #[test]
    fn test_path_rule_applies_to_missing_fields() {
        let v = json!("x");
        assert!(is_expected_difference(
            "session_id",
            DifferenceKind::MissingInRight,
            Some(&v),
            None
        ));
        assert!(is_expected_difference(
            "timestamp",
            DifferenceKind::MissingInLeft,
            None,
            Some(&v)
        ));
    }

    #[test]
    fn test_path_rule_does_not_apply_to_error_kinds() {
        let l = json!("a");
        let r = json!("b");
        assert!(!is_expected_difference(
            "response_error_id",
            DifferenceKind::BothErrors,
            Some(&l),
            Some(&r)
        ));
    }

    #[test]
    fn test_uuid_shape_rule() {
        let l = json!("11111111-1111-1111-1111-111111111111");
        let r = json!("22222222-2222-2222-2222-222222222222");
        assert!(is_expected_difference("payload", KIND, Some(&l), Some(&r)));

        let upper = json!("AAAAAAAA-BBBB-CCCC-DDDD-EEEEFFFF0000");
        assert!(is_expected_difference("payload", KIND, Some(&l), Some(&upper)));

        // One side not a UUID: not expected.
        let not_uuid = json!("not-a-uuid");
        assert!(!is_expected_difference("payload", KIND, Some(&l), Some(&not_uuid)));

        // Braced and compact forms are rejected.
        let braced = json!("{11111111-1111-1111-1111-111111111111}");
        assert!(!is_expected_difference("payload", KIND, Some(&braced), Some(&braced)));
        let compact = json!("11111111111111111111111111111111");
        assert!(!is_expected_difference("payload", KIND, Some(&compact), Some(&compact)));
    }

    #[test]
    fn test_iso_timestamp_rule() {
        let l = json!("2024-03-01T10:00:00Z");
        let r = json!("2024-03-01T10:00:05Z");
        assert!(is_expected_difference("field", KIND, Some(&l), Some(&r)));

        let offset = json!("2024-03-01T10:00:00+02:00");
        assert!(is_expected_difference("field", KIND, Some(&l), Some(&offset)));

        let naive = json!("2024-03-01T10:00:00");
        assert!(is_expected_difference("field", KIND, Some(&naive), Some(&naive.clone())));

        let date_only = json!("2024-03-01");
        assert!(is_expected_difference("field", KIND, Some(&date_only), Some(&date_only.clone())));

        let not_a_time = json!("next tuesday");
        assert!(!is_expected_difference("field", KIND, Some(&l), Some(&not_a_time)));
    }

    #[test]
    fn test_epoch_proximity_rule() {
        let l = json!(1_700_000_000);
        let r = json!(1_700_000_300);
        assert!(is_expected_difference("n", KIND, Some(&l), Some(&r)));

        // Exactly one hour apart: outside the window.
        let far = json!(1_700_003_600);
        assert!(!is_expected_difference("n", KIND, Some(&l), Some(&far)));

        // Large numbers below the epoch floor are ordinary numeric drift.
        let small_l = json!(999_999_999);
        let small_r = json!(999_999_998);
        assert!(!is_expected_difference("n", KIND, Some(&small_l), Some(&small_r)));

        // Mixed int/float representations still qualify.
        let float_r = json!(1_700_000_300.5);
        assert!(is_expected_difference("n", KIND, Some(&l), Some(&float_r)));
    }

    #[test]
    fn test_shape_rules_need_both_values() {
        let v = json!("2024-03-01T10:00:00Z");
        assert!(!is_expected_difference(
            "field",
            DifferenceKind::MissingInRight,
            Some(&v),
            None
        ));
    }
}
