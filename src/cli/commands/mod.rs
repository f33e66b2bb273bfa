//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod deploy;
pub mod package;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use crate::cli::output::OutputConfig;
use crate::config::PackageLayout;

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Archive versions, bundle icons and regenerate apps.json
    Package {
        /// Applications to archive and validate (all if none given)
        apps: Vec<String>,

        /// Reporting level: 0 shows failing apps only, 1 shows every step
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
        debug: u8,
    },

    /// Upload packaged outputs to a deploy destination
    Deploy {
        /// Applications whose primary version is uploaded
        apps: Vec<String>,

        /// Local directory standing in for the remote filesystem root
        #[arg(long, value_name = "DIR")]
        dest: PathBuf,

        /// Print the upload plan without transferring anything
        #[arg(long)]
        dry_run: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Self::Package {
            apps: Vec::new(),
            debug: 0,
        }
    }
}

impl Commands {
    /// Execute the command
    pub fn run(self, layout: &PackageLayout, output: &OutputConfig) -> Result<()> {
        match self {
            Self::Package { apps, debug } => package::execute(layout, &apps, debug, output),
            Self::Deploy {
                apps,
                dest,
                dry_run,
            } => deploy::execute(layout, &apps, &dest, dry_run, output),
        }
    }
}
