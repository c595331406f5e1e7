//! Trace record model and ingestion for the scopelift analyzer.
//!
//! The instrumentation engine that executes the target program is an
//! external collaborator; it writes its observations as newline-delimited
//! JSON records, one per line. This crate owns that record model
//! (`TraceEvent`, `TraceValue`), the consumer contract the analyzer
//! implements (`TraceSink`), and a streaming reader (`TraceReader`).

// Runtime value snapshots and their typeof-style classification
pub mod value;
pub use value::{TraceValue, ValueKind};

// Trace records and usage kinds
pub mod event;
pub use event::{TraceEvent, UsageKind};

// Consumer contract and event routing
pub mod sink;
pub use sink::{TraceSink, dispatch};

// Streaming newline-delimited JSON reader
pub mod reader;
pub use reader::{TraceReadError, TraceReader};
