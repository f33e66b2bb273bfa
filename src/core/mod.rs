//! Core packaging logic
//!
//! Filesystem side effects go through [`crate::infra`]; the modules here
//! decide what to copy, archive, validate and merge.
//!
//! # Submodules
//!
//! - [`app`] - Application discovery and selection
//! - [`failure`] - Failure records accumulated across a run
//! - [`formatter`] - Hybrid JSON layout for manifests
//! - [`icons`] - Icon staging and the icon bundle
//! - [`versions`] - Per-version archives
//! - [`appinfo`] - Manifest loading and validation
//! - [`merge`] - Merged manifest generation
//! - [`pipeline`] - The packaging run tying the stages together
//! - [`deploy`] - Upload planning over a remote filesystem

pub mod app;
pub mod appinfo;
pub mod deploy;
pub mod failure;
pub mod formatter;
pub mod icons;
pub mod merge;
pub mod pipeline;
pub mod versions;
