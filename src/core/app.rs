//! Application discovery
//!
//! An application is an immediate subdirectory of the apps root, identified
//! by its directory name. Its own subdirectories are version folders.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::error::FilesystemError;
use crate::infra::filesystem;

/// A discovered application directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    /// Directory name
    pub name: String,
    /// Full path of the application directory
    pub dir: PathBuf,
}

impl App {
    /// Build from an application directory path
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, dir }
    }

    /// Whether the name carries the excluded-class marker
    pub fn is_excluded(&self, marker: &str) -> bool {
        is_excluded(&self.name, marker)
    }

    /// Expected icon file path
    pub fn icon_path(&self) -> PathBuf {
        self.dir.join(icon_file_name(&self.name))
    }

    /// Manifest path
    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(defaults::MANIFEST_FILE)
    }
}

/// Excluded-class check (e.g. GPU variants)
pub fn is_excluded(app_name: &str, marker: &str) -> bool {
    !marker.is_empty() && app_name.contains(marker)
}

/// Icon file name for an application: `ico-dkapp_<app>.png`
pub fn icon_file_name(app_name: &str) -> String {
    format!(
        "{}{app_name}.{}",
        defaults::ICON_PREFIX,
        defaults::ICON_EXTENSION
    )
}

/// All applications under `apps_dir`, sorted case-insensitively
pub fn discover_apps(apps_dir: &Path) -> Result<Vec<App>, FilesystemError> {
    Ok(filesystem::list_subdirs(apps_dir)?
        .into_iter()
        .map(App::from_dir)
        .collect())
}

/// Restrict `apps` to the requested names; an empty request keeps everything
///
/// Requested names with no matching directory are returned separately.
pub fn select_apps(apps: Vec<App>, requested: &[String]) -> (Vec<App>, Vec<String>) {
    if requested.is_empty() {
        return (apps, Vec::new());
    }

    let wanted: HashSet<&str> = requested.iter().map(String::as_str).collect();
    let found: HashSet<&str> = apps.iter().map(|a| a.name.as_str()).collect();

    let mut unknown: Vec<String> = Vec::new();
    for name in requested {
        if !found.contains(name.as_str()) && !unknown.contains(name) {
            unknown.push(name.clone());
        }
    }

    let selected = apps
        .into_iter()
        .filter(|a| wanted.contains(a.name.as_str()))
        .collect();
    (selected, unknown)
}
