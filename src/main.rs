//! dkpkg CLI - application template packager
//!
//! Entry point for the dkpkg command-line application.

use anyhow::Result;
use clap::Parser;

use dkpkg::cli::output::display_error;
use dkpkg::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    cli.output_config().init_tracing();

    // Run the command and handle errors
    match cli.run() {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
