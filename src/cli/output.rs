//! Output formatting and logging setup
//!
//! User-facing status lines go to stdout with the prefixes in [`status`].
//! Diagnostics go through `tracing` to stderr.

use tracing_subscriber::EnvFilter;

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

/// How much a packaging run reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Only applications with a failing step
    #[default]
    Summary,
    /// Every step of every application
    Detailed,
}

impl Verbosity {
    /// Map the `--debug` level (0 or 1)
    pub fn from_level(level: u8) -> Self {
        if level == 0 {
            Self::Summary
        } else {
            Self::Detailed
        }
    }
}

/// Output settings shared by all commands
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Suppress informational lines
    pub quiet: bool,
    /// Count of `-v` flags
    pub verbose: u8,
}

impl OutputConfig {
    /// Create a new output configuration
    pub fn new(quiet: bool, verbose: u8) -> Self {
        Self { quiet, verbose }
    }

    /// Log level implied by the flags
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Install the global tracing subscriber
    ///
    /// `RUST_LOG` directives are honored on top of the flag-derived level.
    pub fn init_tracing(&self) {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(self.log_level().into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Print an error and its causes to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} Error: {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  Caused by: {cause}");
    }
}
