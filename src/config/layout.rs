//! Workspace path layout
//!
//! Every stage receives a [`PackageLayout`] instead of resolving paths against
//! the process working directory. The layout is built from a workspace root
//! and, optionally, the `[paths]`, `[package]` and `[deploy]` sections of
//! `dkpkg.toml` in that root.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::defaults;
use crate::error::ConfigError;

/// Overrides read from `dkpkg.toml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutConfig {
    /// Path overrides
    #[serde(default)]
    pub paths: PathsConfig,

    /// Packaging options
    #[serde(default)]
    pub package: PackageConfig,

    /// Deploy options
    #[serde(default)]
    pub deploy: DeployConfig,
}

/// `[paths]` section, all relative to the workspace root
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Applications root
    pub apps: Option<PathBuf>,

    /// Package output root
    pub pkg: Option<PathBuf>,

    /// Ordering file
    pub order_file: Option<PathBuf>,

    /// Application tags file
    pub tags_file: Option<PathBuf>,
}

/// `[package]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageConfig {
    /// Name marker for applications exempt from icon/manifest checks
    pub excluded_marker: Option<String>,
}

/// `[deploy]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeployConfig {
    /// Remote directory outputs are uploaded into
    pub remote_root: Option<String>,
}

impl LayoutConfig {
    /// Load overrides from a specific path
    ///
    /// A missing file yields the default (empty) overrides.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }
}

/// All paths and names the packaging pipeline works with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLayout {
    /// Workspace root
    pub root: PathBuf,
    /// One subdirectory per application
    pub apps_dir: PathBuf,
    /// Package output root
    pub pkg_dir: PathBuf,
    /// Icon staging directory
    pub icon_staging_dir: PathBuf,
    /// Icon bundle archive
    pub icon_archive: PathBuf,
    /// Per-version archive directory
    pub templates_dir: PathBuf,
    /// Ordering file
    pub order_file: PathBuf,
    /// Merged manifest output
    pub merged_manifest: PathBuf,
    /// Application tags file (deployed alongside the merged manifest)
    pub tags_file: PathBuf,
    /// Excluded-class name marker
    pub excluded_marker: String,
    /// Remote deploy root
    pub remote_root: String,
}

impl PackageLayout {
    /// Default layout rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, &LayoutConfig::default())
    }

    /// Layout rooted at `root` with `dkpkg.toml` overrides applied
    pub fn with_config(root: impl Into<PathBuf>, config: &LayoutConfig) -> Self {
        let root = root.into();
        let paths = &config.paths;

        let apps_dir = root.join(paths.apps.as_deref().unwrap_or(Path::new(defaults::APPS_DIR)));
        let pkg_dir = root.join(paths.pkg.as_deref().unwrap_or(Path::new(defaults::PKG_DIR)));
        let order_file = root.join(
            paths
                .order_file
                .as_deref()
                .unwrap_or(Path::new(defaults::ORDER_FILE)),
        );
        let tags_file = root.join(
            paths
                .tags_file
                .as_deref()
                .unwrap_or(Path::new(defaults::TAGS_FILE)),
        );

        Self {
            icon_staging_dir: pkg_dir.join(defaults::ICON_STAGING_DIR),
            icon_archive: pkg_dir.join(defaults::ICON_ARCHIVE),
            templates_dir: pkg_dir.join(defaults::TEMPLATES_DIR),
            merged_manifest: pkg_dir.join(defaults::MERGED_MANIFEST),
            excluded_marker: config
                .package
                .excluded_marker
                .clone()
                .unwrap_or_else(|| defaults::EXCLUDED_MARKER.to_string()),
            remote_root: config
                .deploy
                .remote_root
                .clone()
                .unwrap_or_else(|| defaults::REMOTE_ROOT.to_string()),
            root,
            apps_dir,
            pkg_dir,
            order_file,
            tags_file,
        }
    }

    /// Load the layout for `root`, reading `dkpkg.toml` when present
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        if !root.is_dir() {
            return Err(ConfigError::RootNotFound {
                path: root.to_path_buf(),
            });
        }
        let config = LayoutConfig::load_from_path(&root.join(defaults::CONFIG_FILE))?;
        Ok(Self::with_config(root, &config))
    }

    /// Directory of a single application
    pub fn app_dir(&self, app_name: &str) -> PathBuf {
        self.apps_dir.join(app_name)
    }
}
