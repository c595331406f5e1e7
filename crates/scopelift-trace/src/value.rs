//! Runtime value snapshots carried on trace records.

use serde::{Deserialize, Serialize};

/// A JavaScript runtime value as the instrumentation engine observed it.
///
/// Values are externally tagged by runtime type, so the wire shapes are
/// `"undefined"`, `"null"`, `{"boolean":true}`, `{"number":3.0}`,
/// `{"string":"geval"}`, `{"object":{"class":"Array"}}`,
/// `{"function":{"name":"f"}}`, `{"symbol":"Symbol(tag)"}` and
/// `{"bigint":"9007199254740993"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceValue {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    /// Plain objects and arrays; `class` is the constructor name when the
    /// engine captured one.
    Object { class: Option<String> },
    /// Function values; `name` is the declared name when one exists.
    Function { name: Option<String> },
    Symbol(String),
    Bigint(String),
}

impl TraceValue {
    /// The `typeof` tag for this value. Note `typeof null` is `"object"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            TraceValue::Undefined => "undefined",
            TraceValue::Null => "object",
            TraceValue::Boolean(_) => "boolean",
            TraceValue::Number(_) => "number",
            TraceValue::String(_) => "string",
            TraceValue::Object { .. } => "object",
            TraceValue::Function { .. } => "function",
            TraceValue::Symbol(_) => "symbol",
            TraceValue::Bigint(_) => "bigint",
        }
    }

    /// Declared name of a function value, when both apply.
    pub fn function_name(&self) -> Option<&str> {
        match self {
            TraceValue::Function { name } => name.as_deref(),
            _ => None,
        }
    }

    /// Registry classification of this value.
    ///
    /// `None` means the value is not registerable: function-typed and
    /// undefined values are dropped by the variable validity check rather
    /// than recorded.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            TraceValue::Undefined | TraceValue::Function { .. } => None,
            TraceValue::Null | TraceValue::Object { .. } => Some(ValueKind::Object),
            TraceValue::Boolean(_) => Some(ValueKind::Boolean),
            TraceValue::Number(_) => Some(ValueKind::Number),
            TraceValue::String(_) => Some(ValueKind::String),
            TraceValue::Symbol(_) => Some(ValueKind::Symbol),
            TraceValue::Bigint(_) => Some(ValueKind::Bigint),
        }
    }
}

/// The value type recorded on a variable record.
///
/// Mirrors `typeof` with function and undefined excluded (those values
/// never reach a registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Boolean,
    Number,
    String,
    Object,
    Symbol,
    Bigint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typeof_null_is_object() {
        assert_eq!(TraceValue::Null.type_name(), "object");
        assert_eq!(TraceValue::Null.kind(), Some(ValueKind::Object));
    }

    #[test]
    fn test_unregisterable_values_have_no_kind() {
        assert_eq!(TraceValue::Undefined.kind(), None);
        assert_eq!(TraceValue::Function { name: None }.kind(), None);
        assert_eq!(
            TraceValue::Function {
                name: Some("f".to_string())
            }
            .kind(),
            None
        );
    }

    #[test]
    fn test_function_name_extraction() {
        let named = TraceValue::Function {
            name: Some("indirectEval".to_string()),
        };
        assert_eq!(named.function_name(), Some("indirectEval"));
        assert_eq!(TraceValue::Function { name: None }.function_name(), None);
        assert_eq!(TraceValue::Number(1.0).function_name(), None);
    }
}
