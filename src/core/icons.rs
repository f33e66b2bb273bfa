//! Icon collection
//!
//! Copies every application's `ico-dkapp_<app>.png` into the staging
//! directory and zips the staging directory as one bundle. Icons are deployed
//! as a single unit, so this always covers every application, whatever
//! subset the packaging run was asked for.

use std::path::Path;

use crate::config::PackageLayout;
use crate::core::app::{self, App};
use crate::core::failure::{FailureKind, FailureLog};
use crate::error::{ArchiveError, FilesystemError};
use crate::infra::{archive, filesystem};

/// Subject used for failures of the icon bundle itself
pub const ICON_BUNDLE_SUBJECT: &str = "dkapp_ico";

/// Errors that stop icon collection as a whole
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    /// Staging or apps root unusable
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// Bundle could not be written
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

/// Per-application icon result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconStatus {
    /// Icon copied into staging
    Copied,
    /// Icon missing or copy failed (recorded in the failure log)
    Failed,
    /// Excluded-class application, no icon expected
    Skipped,
}

/// Summary of an icon collection pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconReport {
    /// Applications whose icon was copied
    pub copied: Vec<String>,
    /// Applications skipped as excluded-class
    pub skipped: Vec<String>,
    /// Number of icons that could not be staged
    pub failed: usize,
    /// Entries written into the bundle, `None` when archiving was skipped
    pub archived: Option<usize>,
}

/// Copy one application's icon into `staging_dir`
pub fn collect_app_icon(
    app: &App,
    staging_dir: &Path,
    excluded_marker: &str,
    failures: &mut FailureLog,
) -> IconStatus {
    if app.is_excluded(excluded_marker) {
        return IconStatus::Skipped;
    }

    let source = app.icon_path();
    if !source.is_file() {
        failures.record(
            &app.name,
            FailureKind::MissingResource,
            format!("missing icon {}", source.display()),
        );
        return IconStatus::Failed;
    }

    let destination = staging_dir.join(app::icon_file_name(&app.name));
    match filesystem::copy_preserving_metadata(&source, &destination) {
        Ok(()) => {
            tracing::debug!(
                "Copied icon {} -> {}",
                source.display(),
                destination.display()
            );
            IconStatus::Copied
        }
        Err(e) => {
            failures.record(
                &app.name,
                FailureKind::IoFailure,
                format!("icon copy failed - {e}"),
            );
            IconStatus::Failed
        }
    }
}

/// Stage every application's icon and write the icon bundle
///
/// The staging directory is emptied first. When no icon was copied the
/// bundle is not written. Listing the apps root or writing the bundle can
/// fail; missing or uncopyable icons are only recorded in `failures`.
pub fn collect_icons(
    layout: &PackageLayout,
    failures: &mut FailureLog,
) -> Result<IconReport, IconError> {
    let staging_dir = &layout.icon_staging_dir;
    filesystem::recreate_dir(staging_dir)?;

    let mut report = IconReport::default();
    for app in app::discover_apps(&layout.apps_dir)? {
        match collect_app_icon(&app, staging_dir, &layout.excluded_marker, failures) {
            IconStatus::Copied => report.copied.push(app.name),
            IconStatus::Skipped => report.skipped.push(app.name),
            IconStatus::Failed => report.failed += 1,
        }
    }

    if report.copied.is_empty() {
        tracing::info!("No icons copied, skipping icon bundle");
        return Ok(report);
    }

    let archive_root = staging_dir.parent().unwrap_or(staging_dir);
    tracing::info!(
        "Bundling {} icons into {}",
        report.copied.len(),
        layout.icon_archive.display()
    );
    let entries = archive::build_archive(staging_dir, &layout.icon_archive, archive_root)?;
    report.archived = Some(entries);

    Ok(report)
}
