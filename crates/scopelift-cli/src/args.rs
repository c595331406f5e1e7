//! Command-line arguments for the `scopelift` binary.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;

/// Replays a recorded execution trace and reports which functions could be
/// hoisted out of their defining scope.
#[derive(Debug, Parser)]
#[command(name = "scopelift", version, about)]
pub struct CliArgs {
    /// Trace file in JSON Lines format, or `-` to read from stdin.
    pub trace: PathBuf,

    /// Force ANSI colors in the report.
    #[arg(long, overrides_with = "no_pretty")]
    pub pretty: bool,

    /// Disable ANSI colors in the report.
    #[arg(long, overrides_with = "pretty")]
    pub no_pretty: bool,

    /// Print event counters to stderr after the report.
    #[arg(long)]
    pub stats: bool,

    /// Check structural invariants of the finished forest and warn on any
    /// violation.
    #[arg(long)]
    pub validate: bool,
}

impl CliArgs {
    /// Resolves the color choice. Explicit flags win; otherwise colors are
    /// used only when stdout is a terminal.
    pub fn use_color(&self) -> bool {
        if self.pretty {
            return true;
        }
        if self.no_pretty {
            return false;
        }
        std::io::stdout().is_terminal()
    }
}
