//! Packaging pipeline
//!
//! One sequential pass over the apps root:
//!
//! 1. Stage and bundle icons for every application (never filtered by the
//!    selection, the icon bundle is deployed as a whole)
//! 2. For each selected application, archive its versions and, unless it is
//!    excluded-class, validate its manifest
//! 3. Regenerate `apps.json` from the full ordering file
//!
//! Per-application problems land in the report's failure log and never stop
//! the pass. A merge error is kept in the report instead of being returned.

use crate::config::PackageLayout;
use crate::core::app::{self, App};
use crate::core::appinfo::validate_app_info;
use crate::core::failure::{FailureKind, FailureLog};
use crate::core::icons::{self, IconReport, ICON_BUNDLE_SUBJECT};
use crate::core::merge::{merge_app_info, MergeReport};
use crate::core::versions::{archive_versions, VersionArchive};
use crate::error::{FilesystemError, MergeError};
use crate::infra::filesystem;

/// Status of one step for one application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Step succeeded
    Ok,
    /// Step failed (reason in the failure log)
    Failed,
}

impl StepStatus {
    /// Whether the step succeeded
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

/// What happened to one selected application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOutcome {
    /// Application name
    pub name: String,
    /// Excluded-class (no manifest validation)
    pub excluded: bool,
    /// Version archiving result
    pub versions: StepStatus,
    /// Archives written for this application
    pub archives: Vec<VersionArchive>,
    /// Manifest validation result, `None` when not validated
    pub app_info: Option<StepStatus>,
}

impl AppOutcome {
    /// Whether any step failed
    pub fn has_failure(&self) -> bool {
        !self.versions.is_ok() || self.app_info == Some(StepStatus::Failed)
    }
}

/// Everything a packaging run produced
#[derive(Debug)]
pub struct PackageReport {
    /// Icon stage summary, `None` when the stage itself failed
    pub icons: Option<IconReport>,
    /// Selected applications in processing order
    pub apps: Vec<AppOutcome>,
    /// Requested names with no application directory
    pub unknown: Vec<String>,
    /// Failures from the icon and per-application stages
    pub failures: FailureLog,
    /// Merge result
    pub merge: Result<MergeReport, MergeError>,
}

/// Process one selected application
pub fn package_app(app: &App, layout: &PackageLayout, failures: &mut FailureLog) -> AppOutcome {
    tracing::info!("Processing {}", app.name);

    let (versions, archives) = match archive_versions(app, &layout.templates_dir) {
        Ok(report) if report.flags.any => (StepStatus::Ok, report.archives),
        Ok(_) => {
            failures.record(
                &app.name,
                FailureKind::MissingResource,
                "no version folders to archive",
            );
            (StepStatus::Failed, Vec::new())
        }
        Err(e) => {
            failures.record(
                &app.name,
                FailureKind::IoFailure,
                format!("archive failed - {e}"),
            );
            (StepStatus::Failed, Vec::new())
        }
    };

    let excluded = app.is_excluded(&layout.excluded_marker);
    let app_info = if excluded {
        None
    } else {
        Some(match validate_app_info(app) {
            Ok(()) => StepStatus::Ok,
            Err(failure) => {
                failures.push(failure);
                StepStatus::Failed
            }
        })
    };

    AppOutcome {
        name: app.name.clone(),
        excluded,
        versions,
        archives,
        app_info,
    }
}

/// Run the packaging pipeline
///
/// `selected` restricts version archiving and manifest validation; an empty
/// slice means every application. Icons and the merged manifest always
/// cover everything. Errors are returned only when the apps root or the
/// output directories are unusable.
pub fn run(layout: &PackageLayout, selected: &[String]) -> Result<PackageReport, FilesystemError> {
    filesystem::create_dir_all(&layout.templates_dir)?;

    let all_apps = app::discover_apps(&layout.apps_dir)?;
    let (apps, unknown) = app::select_apps(all_apps, selected);
    for name in &unknown {
        tracing::info!("No application directory for '{name}'");
    }

    let mut failures = FailureLog::new();

    let icons = match icons::collect_icons(layout, &mut failures) {
        Ok(report) => Some(report),
        Err(e) => {
            failures.record(
                ICON_BUNDLE_SUBJECT,
                FailureKind::IoFailure,
                format!("icon bundle failed - {e}"),
            );
            None
        }
    };

    let outcomes = apps
        .iter()
        .map(|app| package_app(app, layout, &mut failures))
        .collect();

    let merge = merge_app_info(&layout.order_file, &layout.apps_dir, &layout.merged_manifest);
    if let Err(e) = &merge {
        tracing::info!("Failed to generate {}: {e}", layout.merged_manifest.display());
    }

    Ok(PackageReport {
        icons,
        apps: outcomes,
        unknown,
        failures,
        merge,
    })
}
