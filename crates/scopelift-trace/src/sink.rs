//! Consumer contract for the event stream.

use scopelift_common::{BodyId, SiteId};

use crate::event::{TraceEvent, UsageKind};
use crate::value::TraceValue;

/// Consumer side of the trace event stream.
///
/// Implemented by the scope tree builder. The driver pushes events in
/// observed execution order, one at a time, synchronously; implementations
/// never see `site` records (those are location metadata, routed by the
/// caller).
pub trait TraceSink {
    /// A function activation began.
    fn on_function_enter(&mut self, body: BodyId, name: Option<&str>, site: SiteId);
    /// The innermost open activation ended.
    fn on_function_exit(&mut self);
    /// A variable was declared, read, or written.
    fn on_variable(&mut self, kind: UsageKind, name: &str, value: &TraceValue, is_argument: bool);
    /// A literal value was constructed.
    fn on_literal(&mut self, value: &TraceValue);
    /// The engine classified an upcoming eval call as direct or indirect.
    fn on_eval_mode(&mut self, direct: bool);
}

/// Route a parsed record to the matching sink operation.
///
/// `Site` records are ignored here; the caller feeds them to its site
/// table before dispatching.
pub fn dispatch(event: &TraceEvent, sink: &mut impl TraceSink) {
    match event {
        TraceEvent::Site { .. } => {}
        TraceEvent::FunctionEnter { body, name, site } => {
            sink.on_function_enter(*body, name.as_deref(), *site);
        }
        TraceEvent::FunctionExit => sink.on_function_exit(),
        TraceEvent::VariableDeclare {
            name,
            value,
            argument,
        } => {
            sink.on_variable(UsageKind::Declared, name, value, *argument);
        }
        TraceEvent::VariableRead { name, value } => {
            sink.on_variable(UsageKind::Read, name, value, false);
        }
        TraceEvent::VariableWrite { name, value } => {
            sink.on_variable(UsageKind::Written, name, value, false);
        }
        TraceEvent::LiteralCreated { value } => sink.on_literal(value),
        TraceEvent::EvalModeHint { direct } => sink.on_eval_mode(*direct),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<String>,
    }

    impl TraceSink for RecordingSink {
        fn on_function_enter(&mut self, body: BodyId, name: Option<&str>, site: SiteId) {
            self.calls
                .push(format!("enter {} {:?} {}", body.0, name, site.0));
        }

        fn on_function_exit(&mut self) {
            self.calls.push("exit".to_string());
        }

        fn on_variable(
            &mut self,
            kind: UsageKind,
            name: &str,
            _value: &TraceValue,
            is_argument: bool,
        ) {
            self.calls.push(format!("var {kind:?} {name} {is_argument}"));
        }

        fn on_literal(&mut self, value: &TraceValue) {
            self.calls.push(format!("literal {}", value.type_name()));
        }

        fn on_eval_mode(&mut self, direct: bool) {
            self.calls.push(format!("eval {direct}"));
        }
    }

    #[test]
    fn test_dispatch_routes_every_event_kind() {
        let mut sink = RecordingSink::default();
        dispatch(
            &TraceEvent::FunctionEnter {
                body: BodyId(1),
                name: Some("f".to_string()),
                site: SiteId(3),
            },
            &mut sink,
        );
        dispatch(
            &TraceEvent::VariableRead {
                name: "x".to_string(),
                value: TraceValue::Number(3.0),
            },
            &mut sink,
        );
        dispatch(
            &TraceEvent::LiteralCreated {
                value: TraceValue::Function { name: None },
            },
            &mut sink,
        );
        dispatch(&TraceEvent::EvalModeHint { direct: true }, &mut sink);
        dispatch(&TraceEvent::FunctionExit, &mut sink);

        assert_eq!(
            sink.calls,
            vec![
                "enter 1 Some(\"f\") 3",
                "var Read x false",
                "literal function",
                "eval true",
                "exit",
            ]
        );
    }

    #[test]
    fn test_dispatch_ignores_site_records() {
        let mut sink = RecordingSink::default();
        dispatch(
            &TraceEvent::Site {
                id: SiteId(1),
                loc: "demo.js:1:1".to_string(),
            },
            &mut sink,
        );
        assert!(sink.calls.is_empty());
    }
}
