//! Trace records.

use scopelift_common::{BodyId, SiteId};
use serde::{Deserialize, Serialize};

use crate::value::TraceValue;

/// How a variable event used its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageKind {
    Declared,
    Read,
    Written,
}

/// One record of the trace stream.
///
/// Records are `kind`-tagged JSON objects, one per line. `site` records
/// carry location metadata and may appear anywhere in the stream; all other
/// kinds are analysis events in observed execution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TraceEvent {
    /// Maps an opaque site id to a `file:line:col` string.
    Site { id: SiteId, loc: String },
    /// A function activation began. `name` is absent for function
    /// expressions with no stable name.
    FunctionEnter {
        body: BodyId,
        name: Option<String>,
        site: SiteId,
    },
    /// The innermost open activation ended.
    FunctionExit,
    /// A binding was introduced. `argument` marks formal parameters.
    VariableDeclare {
        name: String,
        value: TraceValue,
        #[serde(default)]
        argument: bool,
    },
    /// A binding was read.
    VariableRead { name: String, value: TraceValue },
    /// A binding was assigned.
    VariableWrite { name: String, value: TraceValue },
    /// A literal value was constructed.
    LiteralCreated { value: TraceValue },
    /// The engine classified an upcoming eval call as direct or indirect.
    EvalModeHint { direct: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_enter_name_is_optional() {
        let event: TraceEvent =
            serde_json::from_str(r#"{"kind":"function-enter","body":9,"site":2}"#)
                .expect("nameless enter parses");
        assert_eq!(
            event,
            TraceEvent::FunctionEnter {
                body: BodyId(9),
                name: None,
                site: SiteId(2),
            }
        );
    }

    #[test]
    fn test_declare_argument_defaults_to_false() {
        let event: TraceEvent = serde_json::from_str(
            r#"{"kind":"variable-declare","name":"a","value":{"number":2.0}}"#,
        )
        .expect("declare without argument flag parses");
        match event {
            TraceEvent::VariableDeclare { argument, .. } => assert!(!argument),
            other => panic!("expected declare, got {other:?}"),
        }
    }

    #[test]
    fn test_kind_tags_are_kebab_case() {
        let json = serde_json::to_string(&TraceEvent::EvalModeHint { direct: false })
            .expect("hint serializes");
        assert!(json.contains(r#""kind":"eval-mode-hint""#), "got {json}");
    }
}
