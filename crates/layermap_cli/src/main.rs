//! `layermap` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments, bootstrap logging and storage, dispatch one command.
//! - Keep output line-oriented for scripting.

mod cli;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    let stdout = std::io::stdout();
    cli::run(args, &mut stdout.lock())
}
