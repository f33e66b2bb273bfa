//! dkpkg - Application template packager
//!
//! Packages a directory of independently versioned applications into
//! deployable artifacts: an icon bundle, one zip per application version, and
//! a merged `apps.json` manifest ordered by `app_order.json`.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Packaging stages and the pipeline driving them
//! - [`infra`] - Infrastructure layer (filesystem, archives, remote transport)
//! - [`config`] - Path layout and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
