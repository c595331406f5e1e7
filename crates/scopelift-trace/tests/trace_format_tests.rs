//! Wire-format tests for trace records.
//!
//! These pin the exact JSON shapes the instrumentation engine emits: kind
//! tags, value tagging, optional fields, and how the reader reports and
//! recovers from malformed lines.

use scopelift_common::{BodyId, SiteId};
use scopelift_trace::{TraceEvent, TraceReadError, TraceReader, TraceValue};

#[test]
fn test_full_record_vocabulary_parses() {
    let trace = r#"
{"kind":"site","id":1,"loc":"demo.js:3:1"}
{"kind":"function-enter","body":17,"name":"parent","site":1}
{"kind":"variable-declare","name":"a","value":{"number":2.0},"argument":false}
{"kind":"variable-read","name":"x","value":{"number":3.0}}
{"kind":"variable-write","name":"b","value":{"number":4.0}}
{"kind":"literal-created","value":{"function":{"name":"indirectEval"}}}
{"kind":"eval-mode-hint","direct":false}
{"kind":"function-exit"}
"#;

    let events: Vec<TraceEvent> = TraceReader::new(trace.as_bytes())
        .map(|r| r.expect("every line is well-formed").1)
        .collect();

    assert_eq!(events.len(), 8);
    assert_eq!(
        events[0],
        TraceEvent::Site {
            id: SiteId(1),
            loc: "demo.js:3:1".to_string(),
        }
    );
    assert_eq!(
        events[1],
        TraceEvent::FunctionEnter {
            body: BodyId(17),
            name: Some("parent".to_string()),
            site: SiteId(1),
        }
    );
    assert_eq!(
        events[5],
        TraceEvent::LiteralCreated {
            value: TraceValue::Function {
                name: Some("indirectEval".to_string()),
            },
        }
    );
    assert_eq!(events[7], TraceEvent::FunctionExit);
}

#[test]
fn test_value_wire_shapes() {
    let cases: Vec<(&str, TraceValue)> = vec![
        (r#""undefined""#, TraceValue::Undefined),
        (r#""null""#, TraceValue::Null),
        (r#"{"boolean":true}"#, TraceValue::Boolean(true)),
        (r#"{"number":3.5}"#, TraceValue::Number(3.5)),
        (
            r#"{"string":"geval"}"#,
            TraceValue::String("geval".to_string()),
        ),
        (r#"{"object":{}}"#, TraceValue::Object { class: None }),
        (
            r#"{"object":{"class":"Array"}}"#,
            TraceValue::Object {
                class: Some("Array".to_string()),
            },
        ),
        (r#"{"function":{}}"#, TraceValue::Function { name: None }),
        (
            r#"{"symbol":"Symbol(tag)"}"#,
            TraceValue::Symbol("Symbol(tag)".to_string()),
        ),
        (
            r#"{"bigint":"9007199254740993"}"#,
            TraceValue::Bigint("9007199254740993".to_string()),
        ),
    ];

    for (json, expected) in cases {
        let parsed: TraceValue =
            serde_json::from_str(json).unwrap_or_else(|e| panic!("{json} should parse: {e}"));
        assert_eq!(parsed, expected, "shape mismatch for {json}");
    }
}

#[test]
fn test_malformed_line_is_isolated() {
    let trace = concat!(
        "{\"kind\":\"function-enter\",\"body\":1,\"name\":\"f\",\"site\":9}\n",
        "{\"kind\":\"mystery-record\"}\n",
        "{\"kind\":\"function-exit\"}\n",
    );

    let results: Vec<_> = TraceReader::new(trace.as_bytes()).collect();
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    match &results[1] {
        Err(TraceReadError::Parse { line, .. }) => assert_eq!(*line, 2),
        other => panic!("unknown kind should be a parse error, got {other:?}"),
    }
    match &results[2] {
        Ok((line, TraceEvent::FunctionExit)) => assert_eq!(*line, 3),
        other => panic!("stream should continue past the bad line, got {other:?}"),
    }
}

#[test]
fn test_error_display_names_the_line() {
    let trace = "][\n";
    let err = TraceReader::new(trace.as_bytes())
        .next()
        .expect("one record")
        .expect_err("line is garbage");
    assert_eq!(err.line(), 1);
    let rendered = err.to_string();
    assert!(
        rendered.starts_with("trace line 1:"),
        "display should locate the failure, got: {rendered}"
    );
}
