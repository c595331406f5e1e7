//! Tracing setup for the `scopelift` binary.
//!
//! Logging is opt-in: when neither `SCOPELIFT_LOG` nor `RUST_LOG` is set,
//! no subscriber is installed and the instrumented spans in the analyzer
//! cost nothing. All output goes to stderr so the report on stdout stays
//! machine-readable.
//!
//! ```bash
//! # follow the builder while it consumes a trace
//! SCOPELIFT_LOG=scopelift_analyzer=debug scopelift trace.jsonl
//!
//! # hierarchical span tree, handy for nested activations
//! SCOPELIFT_LOG=trace SCOPELIFT_LOG_FORMAT=tree scopelift trace.jsonl
//!
//! # one JSON object per event, for piping into jq
//! SCOPELIFT_LOG=debug SCOPELIFT_LOG_FORMAT=json scopelift trace.jsonl
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Output format selected through `SCOPELIFT_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    /// Compact single-line events (default).
    Text,
    /// Hierarchical span tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON events.
    Json,
}

impl LogFormat {
    fn from_env() -> LogFormat {
        match std::env::var("SCOPELIFT_LOG_FORMAT").as_deref() {
            Ok("tree") => LogFormat::Tree,
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Builds the env filter from `SCOPELIFT_LOG`, falling back to `RUST_LOG`.
/// Returns `None` when neither is set, which disables tracing entirely.
fn build_filter() -> Option<EnvFilter> {
    let directives = std::env::var("SCOPELIFT_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()?;
    Some(EnvFilter::new(directives))
}

/// Installs the global subscriber when logging was requested.
pub fn init_tracing() {
    let Some(filter) = build_filter() else {
        return;
    };

    match LogFormat::from_env() {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true),
                )
                .init();
        }
        LogFormat::Tree => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}
