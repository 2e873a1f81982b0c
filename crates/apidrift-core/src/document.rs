//! Closed document tag over JSON trees.
//!
//! Input documents are `serde_json::Value` trees; [`DocKind`] is the closed
//! tag the differ compares. Keeping the tag closed makes the type-mismatch
//! branch of the differ a plain enum comparison.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Dynamic type tag of a document node.
///
/// `number` is a single kind: int-vs-float is a representation detail of
/// `serde_json::Number` and never a type mismatch on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl DocKind {
    /// Tag of a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => DocKind::Null,
            Value::Bool(_) => DocKind::Bool,
            Value::Number(_) => DocKind::Number,
            Value::String(_) => DocKind::String,
            Value::Array(_) => DocKind::Array,
            Value::Object(_) => DocKind::Object,
        }
    }

    /// Stable lowercase label used in serialized difference records.
    pub fn name(self) -> &'static str {
        match self {
            DocKind::Null => "null",
            DocKind::Bool => "bool",
            DocKind::Number => "number",
            DocKind::String => "string",
            DocKind::Array => "array",
            DocKind::Object => "object",
        }
    }
}

impl std::fmt::Display for DocKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_of_each_variant() {
        assert_eq!(DocKind::of(&Value::Null), DocKind::Null);
        assert_eq!(DocKind::of(&json!(true)), DocKind::Bool);
        assert_eq!(DocKind::of(&json!(1)), DocKind::Number);
        assert_eq!(DocKind::of(&json!(1.5)), DocKind::Number);
        assert_eq!(DocKind::of(&json!("x")), DocKind::String);
        assert_eq!(DocKind::of(&json!([1])), DocKind::Array);
        assert_eq!(DocKind::of(&json!({"a": 1})), DocKind::Object);
    }

    #[test]
    fn test_int_and_float_share_a_kind() {
        assert_eq!(DocKind::of(&json!(1)), DocKind::of(&json!(1.0)));
    }

    #[test]
    fn test_serialized_label_matches_name() {
        let json = serde_json::to_string(&DocKind::Number).unwrap();
        assert_eq!(json, "\"number\"");
        assert_eq!(DocKind::Number.name(), "number");
    }
}
