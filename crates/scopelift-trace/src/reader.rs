//! Streaming reader for newline-delimited trace files.

use std::fmt;
use std::io::BufRead;

use crate::event::TraceEvent;

/// A trace line that could not be consumed.
///
/// Carries the 1-based line number so the driver can point at the broken
/// record. Parse failures are recoverable per record: the driver logs them
/// and keeps reading.
#[derive(Debug)]
pub enum TraceReadError {
    /// The underlying reader failed.
    Io {
        line: usize,
        source: std::io::Error,
    },
    /// The line was not a valid trace record.
    Parse {
        line: usize,
        source: serde_json::Error,
    },
}

impl TraceReadError {
    pub fn line(&self) -> usize {
        match self {
            TraceReadError::Io { line, .. } => *line,
            TraceReadError::Parse { line, .. } => *line,
        }
    }
}

impl fmt::Display for TraceReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceReadError::Io { line, source } => {
                write!(f, "trace line {line}: read failed: {source}")
            }
            TraceReadError::Parse { line, source } => {
                write!(f, "trace line {line}: not a valid record: {source}")
            }
        }
    }
}

impl std::error::Error for TraceReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TraceReadError::Io { source, .. } => Some(source),
            TraceReadError::Parse { source, .. } => Some(source),
        }
    }
}

/// Iterator over the records of a newline-delimited trace.
///
/// Yields one result per non-blank line. A parse failure is yielded in
/// place and iteration continues with the next line; an I/O failure is
/// yielded once and ends the stream.
pub struct TraceReader<R> {
    input: R,
    line: usize,
    buf: String,
    done: bool,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(input: R) -> TraceReader<R> {
        TraceReader {
            input,
            line: 0,
            buf: String::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<(usize, TraceEvent), TraceReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.buf.clear();
            self.line += 1;
            match self.input.read_line(&mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(source) => {
                    self.done = true;
                    return Some(Err(TraceReadError::Io {
                        line: self.line,
                        source,
                    }));
                }
            }
            let trimmed = self.buf.trim();
            if trimmed.is_empty() {
                continue;
            }
            return Some(match serde_json::from_str(trimmed) {
                Ok(event) => Ok((self.line, event)),
                Err(source) => Err(TraceReadError::Parse {
                    line: self.line,
                    source,
                }),
            });
        }
    }
}
