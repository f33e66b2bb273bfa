//! Default configuration values

/// Applications root, relative to the workspace root
pub const APPS_DIR: &str = "apps";

/// Package output root, relative to the workspace root
pub const PKG_DIR: &str = "pkg";

/// Icon staging directory name (inside the package root)
pub const ICON_STAGING_DIR: &str = "dkapp_ico";

/// Icon bundle archive name (next to the staging directory)
pub const ICON_ARCHIVE: &str = "dkapp_ico.zip";

/// Per-version archive directory name (inside the package root)
pub const TEMPLATES_DIR: &str = "templates";

/// Per-application manifest file name
pub const MANIFEST_FILE: &str = "app.json";

/// Ordering file, relative to the workspace root
pub const ORDER_FILE: &str = "app_order.json";

/// Merged manifest name (inside the package root)
pub const MERGED_MANIFEST: &str = "apps.json";

/// Application tags file, relative to the workspace root
pub const TAGS_FILE: &str = "apptags.json";

/// Icon file name prefix; the full name is `<prefix><app>.png`
pub const ICON_PREFIX: &str = "ico-dkapp_";

/// Icon file extension
pub const ICON_EXTENSION: &str = "png";

/// Applications whose name contains this marker need no icon or manifest
pub const EXCLUDED_MARKER: &str = "gpu";

/// Base indent of the hybrid manifest layout
pub const MANIFEST_INDENT: usize = 2;

/// Optional per-workspace configuration file
pub const CONFIG_FILE: &str = "dkpkg.toml";

/// Remote directory the packaged outputs are deployed into
pub const REMOTE_ROOT: &str = "/www/dk_project/dk_app";

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
