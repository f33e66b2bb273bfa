//! Version archiving
//!
//! Each immediate subdirectory of an application is one version and becomes
//! one archive in the templates directory:
//!
//! - `apps/<app>/<app>/` (primary version) -> `<app>.zip`
//! - `apps/<app>/<version>/` -> `<app>-<version>.zip`
//!
//! Entries are stored relative to the application directory, so every
//! archive's top-level folder is the version folder itself.

use std::path::{Path, PathBuf};

use crate::core::app::App;
use crate::error::ArchiveError;
use crate::infra::{archive, filesystem};

/// What an archiving pass produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionFlags {
    /// At least one version archived
    pub any: bool,
    /// The primary (same-name) version was archived
    pub same: bool,
    /// At least one other version was archived
    pub other: bool,
}

/// One written version archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionArchive {
    /// Version folder name
    pub version: String,
    /// Whether this is the primary version
    pub primary: bool,
    /// Version folder
    pub source: PathBuf,
    /// Written archive
    pub archive: PathBuf,
}

/// Result of archiving one application
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionReport {
    /// Summary flags
    pub flags: VersionFlags,
    /// Archives in the order they were written
    pub archives: Vec<VersionArchive>,
}

/// Archive file name for a version of an application
pub fn archive_name(app_name: &str, version_name: &str) -> String {
    if version_name == app_name {
        format!("{app_name}.zip")
    } else {
        format!("{app_name}-{version_name}.zip")
    }
}

/// Zip every version folder of `app` into `output_dir`
///
/// Versions are processed in case-insensitive name order and loose files in
/// the application directory are ignored. An application without version
/// folders returns all flags unset; treating that as a failure is up to the
/// caller. The first archive error aborts the remaining versions of this
/// application.
pub fn archive_versions(app: &App, output_dir: &Path) -> Result<VersionReport, ArchiveError> {
    let mut report = VersionReport::default();

    for version_dir in filesystem::list_subdirs(&app.dir)? {
        let version = version_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let primary = version == app.name;
        let destination = output_dir.join(archive_name(&app.name, &version));

        archive::build_archive(&version_dir, &destination, &app.dir)?;

        report.flags.any = true;
        if primary {
            report.flags.same = true;
        } else {
            report.flags.other = true;
        }
        tracing::debug!(
            "Archived {} version {} -> {}",
            if primary { "primary" } else { "extra" },
            version_dir.display(),
            destination.display()
        );

        report.archives.push(VersionArchive {
            version,
            primary,
            source: version_dir,
            archive: destination,
        });
    }

    Ok(report)
}
