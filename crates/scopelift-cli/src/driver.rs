//! Drives one analysis run: opens the trace, streams its events into the
//! builder, and collects everything the binary prints afterwards.

use std::fs::File;
use std::io::{BufRead, BufReader};

use anyhow::{Context, Result};
use scopelift_analyzer::{AnalysisStats, TreeBuilder};
use scopelift_trace::{TraceEvent, TraceReader, dispatch};
use tracing::warn;

use crate::args::CliArgs;

/// Everything a finished run produced, kept separate from printing so
/// tests can assert on it directly.
#[derive(Debug)]
pub struct RunOutcome {
    /// Report lines joined with newlines. Empty when no root completed.
    pub report: String,
    /// Event counters accumulated by the builder.
    pub stats: AnalysisStats,
    /// Trace lines that failed to decode and were skipped.
    pub malformed_lines: u64,
    /// Structural violations found by `--validate`, zero otherwise.
    pub structural_errors: u64,
}

/// Runs the analysis described by `args`. Only startup problems such as an
/// unreadable trace file are errors; malformed trace lines are logged and
/// skipped so one bad record cannot sink a long recording.
pub fn run(args: &CliArgs) -> Result<RunOutcome> {
    let mut builder = TreeBuilder::new(args.use_color());

    let malformed_lines = if args.trace.as_os_str() == "-" {
        consume(std::io::stdin().lock(), &mut builder)
    } else {
        let file = File::open(&args.trace)
            .with_context(|| format!("failed to open trace file {}", args.trace.display()))?;
        consume(BufReader::new(file), &mut builder)
    };

    let open = builder.open_activations();
    if open > 0 {
        warn!(open, "trace ended with unclosed activations");
    }

    let mut structural_errors = 0;
    if args.validate {
        for error in builder.validate() {
            warn!(?error, "scope forest invariant violated");
            structural_errors += 1;
        }
    }

    Ok(RunOutcome {
        report: builder.render_report(),
        stats: builder.stats().clone(),
        malformed_lines,
        structural_errors,
    })
}

/// Streams every event from `input` into the builder and returns how many
/// lines could not be decoded. Site records configure the builder's line
/// table; everything else goes through the sink.
fn consume(input: impl BufRead, builder: &mut TreeBuilder) -> u64 {
    let mut malformed = 0;
    for item in TraceReader::new(input) {
        match item {
            Ok((_, TraceEvent::Site { id, loc })) => builder.add_site(id, loc),
            Ok((_, event)) => dispatch(&event, builder),
            Err(error) => {
                warn!(line = error.line(), %error, "skipping malformed trace line");
                malformed += 1;
            }
        }
    }
    malformed
}
