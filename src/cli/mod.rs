//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::PackageLayout;
use commands::Commands;
use output::OutputConfig;

/// dkpkg - application template packager
///
/// Archives application versions, bundles icons and regenerates the merged
/// app catalog.
#[derive(Parser, Debug)]
#[command(name = "dkpkg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Workspace root containing apps/ and app_order.json (default: current directory)
    #[arg(long, global = true, env = "DKPKG_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress everything except errors and failures
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Output settings derived from the global flags
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::new(self.quiet, self.verbose)
    }

    /// Execute the CLI command
    ///
    /// Without a subcommand every application is packaged at the summary level.
    pub fn run(self) -> Result<()> {
        let output = self.output_config();
        let root = match self.root {
            Some(root) => root,
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };
        let layout = PackageLayout::load(&root)
            .with_context(|| format!("Failed to load workspace at {}", root.display()))?;

        self.command.unwrap_or_default().run(&layout, &output)
    }
}
