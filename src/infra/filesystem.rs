//! Filesystem operations
//!
//! Handles file and directory operations.

use std::io::Write;
use std::path::{Path, PathBuf};

use filetime::FileTime;

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a directory and all its contents
pub fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}

/// Remove a directory tree and create it again empty
pub fn recreate_dir(path: &Path) -> Result<(), FilesystemError> {
    remove_dir_all(path)?;
    create_dir_all(path)
}

/// Immediate subdirectories of `dir`, sorted case-insensitively by name
///
/// Non-directory entries are skipped.
pub fn list_subdirs(dir: &Path) -> Result<Vec<PathBuf>, FilesystemError> {
    let read_dir_err = |e: std::io::Error| FilesystemError::ReadDir {
        path: dir.to_path_buf(),
        error: e.to_string(),
    };

    let mut subdirs = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();
        if path.is_dir() {
            subdirs.push(path);
        }
    }

    subdirs.sort_by_cached_key(|p| sort_key(p));
    Ok(subdirs)
}

fn sort_key(path: &Path) -> (String, String) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    // Tie-break on the original name so the order is total
    (name.to_lowercase(), name)
}

/// Copy a file, keeping permissions and access/modification times
pub fn copy_preserving_metadata(from: &Path, to: &Path) -> Result<(), FilesystemError> {
    let copy_err = |e: std::io::Error| FilesystemError::CopyFile {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        error: e.to_string(),
    };

    if let Some(parent) = to.parent() {
        create_dir_all(parent)?;
    }
    std::fs::copy(from, to).map_err(copy_err)?;

    let metadata = std::fs::metadata(from).map_err(copy_err)?;
    filetime::set_file_times(
        to,
        FileTime::from_last_access_time(&metadata),
        FileTime::from_last_modification_time(&metadata),
    )
    .map_err(copy_err)
}

/// Replace a file's content in one step
///
/// The content goes to a temporary file in the destination directory which
/// is then renamed over `path`, so readers never observe a partial file.
pub fn write_file_atomic(path: &Path, content: &str) -> Result<(), FilesystemError> {
    let write_err = |error: String| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        error,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| write_err(e.to_string()))?;
    tmp.write_all(content.as_bytes())
        .and_then(|()| tmp.flush())
        .map_err(|e| write_err(e.to_string()))?;
    tmp.persist(path).map_err(|e| write_err(e.error.to_string()))?;
    Ok(())
}

/// Read content from a file
pub fn read_file(path: &Path) -> Result<String, FilesystemError> {
    std::fs::read_to_string(path).map_err(|e| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}
