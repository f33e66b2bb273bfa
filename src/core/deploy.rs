//! Deploy planning and upload
//!
//! A deploy pushes the merged manifest, the tags file and the primary
//! version folder of each named application to the remote deploy root:
//!
//! | local                    | remote                        |
//! |--------------------------|-------------------------------|
//! | `pkg/apps.json`          | `<remote>/apps.json`          |
//! | `apptags.json`           | `<remote>/apptags.json`       |
//! | `apps/<app>/<app>/`      | `<remote>/templates/<app>/`   |
//!
//! Transfers go through [`RemoteFs`]; connection setup is the transport's
//! concern.

use std::path::{Path, PathBuf};

use crate::config::defaults::{MERGED_MANIFEST, TAGS_FILE, TEMPLATES_DIR};
use crate::config::PackageLayout;
use crate::error::{DeployError, FilesystemError};
use crate::infra::remote::RemoteFs;

/// One local path and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    /// Local file or directory
    pub local: PathBuf,
    /// Remote destination
    pub remote: String,
}

/// Ordered list of uploads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployPlan {
    /// Mappings in upload order
    pub mappings: Vec<Mapping>,
}

/// Outcome of an upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployReport {
    /// Remote files written
    pub files: Vec<String>,
    /// Remote directories created
    pub dirs_created: usize,
    /// Local paths that were neither file nor directory
    pub skipped: Vec<PathBuf>,
}

fn remote_join(base: &str, name: &str) -> String {
    format!("{}/{name}", base.trim_end_matches('/'))
}

fn remote_parent(remote: &str) -> Option<&str> {
    match remote.rfind('/') {
        Some(0) | None => None,
        Some(idx) => Some(&remote[..idx]),
    }
}

impl DeployPlan {
    /// Plan the standard deploy for `apps`
    pub fn for_apps(layout: &PackageLayout, apps: &[String]) -> Self {
        let root = layout.remote_root.as_str();
        let mut mappings = vec![
            Mapping {
                local: layout.merged_manifest.clone(),
                remote: remote_join(root, MERGED_MANIFEST),
            },
            Mapping {
                local: layout.tags_file.clone(),
                remote: remote_join(root, TAGS_FILE),
            },
        ];

        let templates = remote_join(root, TEMPLATES_DIR);
        for app in apps {
            mappings.push(Mapping {
                local: layout.app_dir(app).join(app),
                remote: remote_join(&templates, app),
            });
        }

        Self { mappings }
    }
}

fn ensure_remote_dir(remote: &mut dyn RemoteFs, dir: &str) -> Result<bool, DeployError> {
    match remote.mkdir(dir) {
        Ok(()) => Ok(true),
        Err(DeployError::AlreadyExists { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}

fn upload_dir(
    remote: &mut dyn RemoteFs,
    local: &Path,
    target: &str,
    report: &mut DeployReport,
) -> Result<(), DeployError> {
    if ensure_remote_dir(remote, target)? {
        report.dirs_created += 1;
    }

    let mut children: Vec<PathBuf> = std::fs::read_dir(local)
        .and_then(|rd| rd.map(|e| e.map(|e| e.path())).collect())
        .map_err(|e| FilesystemError::ReadDir {
            path: local.to_path_buf(),
            error: e.to_string(),
        })?;
    children.sort();

    for child in children {
        let name = child
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let child_target = remote_join(target, &name);
        if child.is_file() {
            remote.put(&child, &child_target)?;
            report.files.push(child_target);
        } else if child.is_dir() {
            upload_dir(remote, &child, &child_target, report)?;
        }
    }
    Ok(())
}

/// Execute `plan` against `remote`
///
/// Remote directories are created as needed; existing ones are fine.
pub fn upload(plan: &DeployPlan, remote: &mut dyn RemoteFs) -> Result<DeployReport, DeployError> {
    let mut report = DeployReport::default();

    for mapping in &plan.mappings {
        let local = &mapping.local;
        if !local.is_file() && !local.is_dir() {
            tracing::warn!("{} is not a file or directory, skipping", local.display());
            report.skipped.push(local.clone());
            continue;
        }

        if let Some(parent) = remote_parent(&mapping.remote) {
            ensure_parents(remote, parent, &mut report)?;
        }
        if local.is_file() {
            remote.put(local, &mapping.remote)?;
            tracing::debug!("Uploaded {} -> {}", local.display(), mapping.remote);
            report.files.push(mapping.remote.clone());
        } else {
            upload_dir(remote, local, &mapping.remote, &mut report)?;
        }
    }

    Ok(report)
}

fn ensure_parents(
    remote: &mut dyn RemoteFs,
    dir: &str,
    report: &mut DeployReport,
) -> Result<(), DeployError> {
    if let Some(parent) = remote_parent(dir) {
        ensure_parents(remote, parent, report)?;
    }
    if ensure_remote_dir(remote, dir)? {
        report.dirs_created += 1;
    }
    Ok(())
}

/// Check that the packaged outputs a deploy needs exist locally
pub fn missing_locals(plan: &DeployPlan) -> Vec<PathBuf> {
    plan.mappings
        .iter()
        .filter(|m| !m.local.exists())
        .map(|m| m.local.clone())
        .collect()
}
