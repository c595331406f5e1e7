//! `scopelift` entry point. Replays a JSON Lines execution trace and
//! prints a hoistability report for every function the trace completed.

mod args;
mod driver;
mod tracing_config;

use anyhow::Result;
use clap::Parser;

use crate::args::CliArgs;

fn main() -> Result<()> {
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let outcome = driver::run(&args)?;

    if !outcome.report.is_empty() {
        println!("{}", outcome.report);
    }
    if args.stats {
        eprintln!("{}", outcome.stats);
    }

    Ok(())
}
