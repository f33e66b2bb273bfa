//! Merged manifest generation
//!
//! Builds `apps.json` from the per-application manifests in the order given
//! by `app_order.json`. The ordering file is the complete list of
//! applications considered here, independent of any selection made for
//! archiving. Missing and malformed manifests are skipped and reported; only
//! a missing or invalid ordering file aborts the merge.

use std::path::Path;

use crate::config::defaults::{MANIFEST_FILE, MANIFEST_INDENT};
use crate::core::appinfo::{load_manifest, ManifestLoad};
use crate::core::failure::FailureKind;
use crate::core::formatter::format_hybrid;
use crate::error::MergeError;
use crate::infra::filesystem;

/// Why an ordered application was left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingManifest {
    /// Application name from the ordering file
    pub app: String,
    /// Reason it was skipped
    pub reason: String,
}

/// Outcome of a merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Names listed in the ordering file
    pub total: usize,
    /// Applications merged, in output order
    pub merged: Vec<String>,
    /// Applications skipped, in ordering-file order
    pub missing: Vec<MissingManifest>,
}

impl MergeReport {
    /// Names of the skipped applications
    pub fn missing_names(&self) -> Vec<&str> {
        self.missing.iter().map(|m| m.app.as_str()).collect()
    }
}

impl MergeError {
    /// Failure class of a merge error
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::OrderFileNotFound { .. } | Self::OrderFileInvalid { .. } => {
                FailureKind::FatalConfiguration
            }
            Self::Output(_) => FailureKind::IoFailure,
        }
    }
}

/// Read the ordering file as a list of application names
pub fn read_order(order_file: &Path) -> Result<Vec<String>, MergeError> {
    if !order_file.is_file() {
        return Err(MergeError::OrderFileNotFound {
            path: order_file.to_path_buf(),
        });
    }

    let content = filesystem::read_file(order_file).map_err(|e| MergeError::OrderFileInvalid {
        path: order_file.to_path_buf(),
        error: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| MergeError::OrderFileInvalid {
        path: order_file.to_path_buf(),
        error: e.to_string(),
    })
}

/// Join formatted manifests into the `apps.json` array text
pub fn render_merged(documents: &[String]) -> String {
    if documents.is_empty() {
        return "[\n]".to_string();
    }
    format!("[\n{}\n]", documents.join(",\n"))
}

/// Merge `<apps_dir>/<name>/app.json` for every name in `order_file` into `output_file`
///
/// The output is rewritten in full on every call.
pub fn merge_app_info(
    order_file: &Path,
    apps_dir: &Path,
    output_file: &Path,
) -> Result<MergeReport, MergeError> {
    let order = read_order(order_file)?;
    let mut report = MergeReport {
        total: order.len(),
        ..MergeReport::default()
    };
    let mut documents = Vec::with_capacity(order.len());

    for name in order {
        let path = apps_dir.join(&name).join(MANIFEST_FILE);
        let skipped = match load_manifest(&path) {
            ManifestLoad::Loaded(manifest) => match format_hybrid(&manifest, MANIFEST_INDENT) {
                Ok(text) => {
                    tracing::debug!("Merged {}", path.display());
                    documents.push(text);
                    report.merged.push(name);
                    continue;
                }
                Err(e) => format!("cannot format {}: {e}", path.display()),
            },
            ManifestLoad::Missing => format!("not found: {}", path.display()),
            ManifestLoad::Malformed(reason) => {
                format!("invalid JSON in {}: {reason}", path.display())
            }
            ManifestLoad::Unreadable(reason) => {
                format!("cannot read {}: {reason}", path.display())
            }
        };

        tracing::info!("Skipping {name}: {skipped}");
        report.missing.push(MissingManifest {
            app: name,
            reason: skipped,
        });
    }

    filesystem::write_file_atomic(output_file, &render_merged(&documents))?;
    tracing::info!(
        "Generated {}: {} apps, {} missing",
        output_file.display(),
        report.total,
        report.missing.len()
    );

    Ok(report)
}
